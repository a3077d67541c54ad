// mod.rs - Task planning and output driver module

pub mod driver;
pub mod prefix;
pub mod tasks;
pub mod traits;

pub use driver::{OutputConfig, OutputDriver, RunReport};
pub use prefix::{artifact_path, default_prefix, DEFAULT_PREFIX_TAG};
pub use tasks::{plan_tasks, Task};
pub use traits::{DefaultKernels, FigureBackend, MatrixWriter, MutinfoKernels};
