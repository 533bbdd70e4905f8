pub mod model;
pub mod view;
pub mod view_model;

pub use view::CreateDevisModal;
pub use view_model::CreateDevisVm;
