//! Planned-vs-actual chart pipeline: normalize, order, lay out, render.

pub mod layout;
pub mod normalize;
pub mod render;
pub mod scene;

#[cfg(test)]
pub(crate) mod test_helpers;

use chrono::NaiveDate;
use tracing::info;

use crate::config::ChartSettings;
use crate::model::TaskRow;

pub use scene::ChartScene;

/// Build the chart for a validated table as of `today`.
///
/// `None` means no visible task: there is nothing to render, which is not an error.
pub fn build_chart(rows: &[TaskRow], today: NaiveDate, settings: &ChartSettings) -> Option<ChartScene> {
    let records = normalize::normalize(rows, today)?;
    let ordered = layout::order_tasks(records);
    let arranged = layout::layout(&ordered, today);
    let scene = render::render(&arranged, settings);
    info!(
        tasks = scene.task_count,
        projects = scene.project_count,
        %today,
        "built chart"
    );
    Some(scene)
}
