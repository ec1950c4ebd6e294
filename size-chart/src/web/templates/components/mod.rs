pub(crate) mod client_script;
pub(crate) mod size_chart_button;
pub(crate) mod size_chart_modal;

pub(crate) use client_script::ClientScript;
pub(crate) use size_chart_button::SizeChartButton;
pub(crate) use size_chart_modal::SizeChartModal;
