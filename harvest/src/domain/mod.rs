mod filters;
mod project_assignment;
mod time_entry;

pub use filters::*;
pub use project_assignment::*;
pub use time_entry::*;

use time::Date;

time::serde::format_description!(spent_date_format, Date, "[year]-[month]-[day]");
