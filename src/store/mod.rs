pub mod record;
pub mod label_store;

pub use record::LabelRecord;
pub use label_store::LabelStore;
