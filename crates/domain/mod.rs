pub mod clock;
pub mod entities;
pub mod mappers;
pub mod repositories;
pub mod validators;
pub mod value_objects;
