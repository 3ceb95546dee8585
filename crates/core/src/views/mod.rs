pub mod plot;
pub mod results;

pub use plot::{PlotFrame, render_plot};
pub use results::{ScaleReport, ScaledRow, scale_session};
