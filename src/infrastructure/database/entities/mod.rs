//! Database entities module

pub mod city;
pub mod guide;
pub mod language;
pub mod module;
pub mod question;
pub mod user;

pub use city::Entity as City;
pub use guide::Entity as Guide;
pub use language::Language;
pub use module::Entity as Module;
pub use question::Entity as Question;
pub use user::Entity as User;
