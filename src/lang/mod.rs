/*!
## Language module

Errors and source-text scanning. Lines are kept exactly as typed and
scanned in place every time they execute; there is no token stream.

*/

mod error;
mod scan;

pub use error::Error;
pub use error::ErrorCode;
pub use scan::Cursor;
