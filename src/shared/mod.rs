pub mod envelope;
pub mod errors;
pub mod pagination;
pub mod shutdown;

pub use envelope::*;
pub use errors::*;
pub use pagination::*;
pub use shutdown::*;
