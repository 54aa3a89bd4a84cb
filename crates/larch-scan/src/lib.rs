//! A line scanner for the larch configuration format

mod span;
pub use span::Span;

mod line;
pub use line::{Line, LineBody, RawValue};

mod scanner;
pub use scanner::Scanner;

mod name;
pub use name::{is_name_char, is_valid_name};

mod value;
pub use value::decode_value;
