mod loader;
mod record;
mod store;

pub use loader::{LoaderState, SceneLoader};
pub use record::SceneRecord;
pub use store::LabelStore;
