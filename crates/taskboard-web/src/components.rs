mod edit_modal;
mod filter_bar;
mod stats_bar;
mod task_card;
mod task_form;

pub use edit_modal::EditModal;
pub use filter_bar::FilterBar;
pub use stats_bar::StatsBar;
pub use task_card::TaskCardView;
pub use task_form::TaskFormPanel;
