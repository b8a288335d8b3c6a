//! Progress reporting while a question is being answered

pub mod reporter;
