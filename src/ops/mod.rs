pub mod candidates;
pub mod project_picker;
pub mod task_list;
