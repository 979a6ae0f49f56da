pub mod chat_widget;
pub mod common;
pub mod connect_popup;
pub mod force_graph;
pub mod graph_controls;
pub mod nav;
