mod guild;
mod member;
