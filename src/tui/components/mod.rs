// Components module - UI building blocks
//
// - Table panel: the sortable, paginated gamma table
// - Status bar: symbol, sort state, key hints, recent problems
// - Toast: transient confirmation overlay

pub mod status_bar;
pub mod table_panel;
pub mod toast;

pub use toast::Toast;
