mod binomial;
mod value;

pub use binomial::*;
pub use value::*;
