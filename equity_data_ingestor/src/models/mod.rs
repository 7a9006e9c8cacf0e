pub mod daily_series;
pub mod overview;
pub mod quote;
pub mod request_params;
