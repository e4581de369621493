pub mod dual;
pub mod interval;
pub mod primitives;
pub mod registry;
pub mod traits;

pub use dual::Dual;
pub use interval::Interval;
pub use registry::{Callable, DispatchTable};
pub use traits::Numeric;
