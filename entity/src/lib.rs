pub mod guild;
pub mod member;

pub mod prelude {
    pub use super::guild::Entity as Guild;
    pub use super::member::Entity as Member;
}
