pub mod kpi_card;
pub mod price_table;
pub mod sparkline;
pub mod spot_badge;
pub mod toast;
pub mod trend_chart;
