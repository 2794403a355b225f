//! Weekly burnout risk line chart (inline SVG)

use leptos::*;
use sprint_pulse::models::TrendPoint;

use crate::DashboardContext;

const CHART_WIDTH: f32 = 320.0;
const CHART_HEIGHT: f32 = 140.0;

/// SVG polyline points for risk scores on a 0-100 scale.
/// The y axis is inverted so higher risk sits higher on the chart.
fn trend_points(points: &[TrendPoint], width: f32, height: f32) -> String {
    let step = if points.len() > 1 {
        width / (points.len() - 1) as f32
    } else {
        0.0
    };
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = i as f32 * step;
            let y = height - height * f32::from(p.risk_score.min(100)) / 100.0;
            format!("{:.1},{:.1}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[component]
pub fn BurnoutChart() -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext not found");

    let points = create_memo(move |_| ctx.snapshot.with(|s| s.burnout_trend.clone()));

    view! {
        <div class="card chart-card">
            <h3 class="card-title">"Burnout Risk Trend"</h3>
            <svg
                class="trend-chart"
                viewBox=format!("-10 -10 {} {}", CHART_WIDTH + 20.0, CHART_HEIGHT + 30.0)
                preserveAspectRatio="none"
            >
                <line class="chart-axis" x1="0" y1=CHART_HEIGHT.to_string() x2=CHART_WIDTH.to_string() y2=CHART_HEIGHT.to_string()></line>
                <polyline
                    class="trend-line"
                    fill="none"
                    stroke-width="2.5"
                    points=move || points.with(|p| trend_points(p, CHART_WIDTH, CHART_HEIGHT))
                ></polyline>
                {move || {
                    let trend = points.get();
                    let step = if trend.len() > 1 { CHART_WIDTH / (trend.len() - 1) as f32 } else { 0.0 };
                    trend.into_iter().enumerate().map(|(i, p)| {
                        let x = i as f32 * step;
                        view! {
                            <text class="chart-label" x=x.to_string() y=(CHART_HEIGHT + 16.0).to_string() text-anchor="middle">
                                {p.day}
                            </text>
                        }
                    }).collect_view()
                }}
            </svg>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(day: &str, risk_score: u8) -> TrendPoint {
        TrendPoint { day: day.to_string(), risk_score }
    }

    #[test]
    fn test_trend_points_spread_across_width() {
        let points = vec![point("Mon", 0), point("Tue", 50), point("Wed", 100)];
        assert_eq!(trend_points(&points, 200.0, 100.0), "0.0,100.0 100.0,50.0 200.0,0.0");
    }

    #[test]
    fn test_trend_points_single_and_empty() {
        assert_eq!(trend_points(&[point("Mon", 40)], 200.0, 100.0), "0.0,60.0");
        assert_eq!(trend_points(&[], 200.0, 100.0), "");
    }
}
