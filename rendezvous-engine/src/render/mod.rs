//! Drawing a calculation result onto a map surface.
//!
//! The engine never touches a map SDK. Callers implement [`Renderer`] for
//! whatever surface they draw on and hand it to [`render_result`].

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{Color, Coordinate, Traveler, TravelerId};
use crate::grouping::TimeCompatibility;
use crate::planner::{CalculationResult, PlanError, PlanRequest, RendezvousPlanner, Role};
use crate::provider::RouteProvider;

/// How a joined stretch of path is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedStyle {
    /// The leader's color.
    pub color: Color,
    pub dashed: bool,
}

impl JoinedStyle {
    pub fn dashed(color: Color) -> Self {
        Self { color, dashed: true }
    }
}

/// A map surface the result can be drawn on.
pub trait Renderer {
    /// Remove everything previously drawn.
    fn clear(&mut self);

    fn draw_path(&mut self, points: &[Coordinate], color: &Color);

    fn draw_joined_path(&mut self, points: &[Coordinate], style: &JoinedStyle);

    /// Frame the camera so every point is visible.
    fn fit_camera(&mut self, points: &[Coordinate]);
}

/// Draw every plan in `result`, then frame the camera on its bounds.
///
/// Solo stretches use the traveler's own color. Joined stretches use the
/// leader's color, dashed. Paths with fewer than two points are skipped.
pub fn render_result<R: Renderer + ?Sized>(
    result: &CalculationResult,
    travelers: &[Traveler],
    renderer: &mut R,
) {
    let colors: HashMap<&TravelerId, &Color> = travelers.iter().map(|t| (&t.id, &t.color)).collect();

    for plan in &result.plans {
        let Some(own) = colors.get(&plan.id).copied() else {
            debug!(traveler = %plan.id, "Plan for unknown traveler, not drawn");
            continue;
        };

        if plan.solo_points.len() > 1 {
            renderer.draw_path(&plan.solo_points, own);
        }

        if plan.joined_points.len() > 1 {
            let leader_color = match (plan.role, &plan.leader) {
                (Role::Follower, Some(leader)) => colors.get(leader).copied().unwrap_or(own),
                _ => own,
            };
            renderer.draw_joined_path(&plan.joined_points, &JoinedStyle::dashed(leader_color.clone()));
        }
    }

    if !result.bounds.is_empty() {
        renderer.fit_camera(&result.bounds);
    }
}

/// Clear the surface, plan the request, and draw the result.
///
/// Nothing is drawn until the calculation has finished. Dropping the
/// returned future before then leaves the surface cleared.
pub async fn plan_and_render<P, T, R>(
    planner: &RendezvousPlanner<P, T>,
    request: &PlanRequest,
    renderer: &mut R,
) -> Result<CalculationResult, PlanError>
where
    P: RouteProvider,
    T: TimeCompatibility,
    R: Renderer + ?Sized,
{
    renderer.clear();
    let result = planner.calculate(request).await?;
    render_result(&result, &request.travelers, renderer);
    Ok(result)
}
