//! Chart Component
//!
//! One chart slot drawn on an HTML5 Canvas, with its own sensor, chart type
//! and color selectors. Wheel and pinch zoom, drag pans, double-click resets,
//! each as far as the chart's zoom options allow.

use leptos::*;
use std::cell::{Cell, RefCell};
use std::f64::consts::PI;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use sensor_dashboard::chart::{pinch_factor, wheel_factor, ZoomOptions};
use sensor_dashboard::{
    ChartConfiguration, ChartController, ChartSlotId, ChartType, DashboardResult, RenderCommand,
    SensorType, Viewport,
};

use crate::state::global::GlobalState;

const CANVAS_WIDTH: u32 = 800;
const CANVAS_HEIGHT: u32 = 400;

/// Chart controller plus the view state derived from its render
#[derive(Clone)]
struct ChartHandle {
    controller: Rc<RefCell<ChartController>>,
    viewport: Rc<Cell<Option<Viewport>>>,
    redraw: RwSignal<u64>,
}

impl ChartHandle {
    /// Apply the outcome of a controller call to the canvas
    fn apply(&self, command: RenderCommand) {
        if let RenderCommand::Rebuild { generation } = command {
            let controller = self.controller.borrow();
            let viewport = controller.current().map(|render| {
                let mode = render.config.zoom_options().mode();
                Viewport::with_mode(*render.config.limits(), mode)
            });
            drop(controller);
            self.viewport.set(viewport);
            tracing::debug!("Chart rebuilt (generation {})", generation);
        }
        self.redraw.update(|n| *n += 1);
    }

    /// Zoom and pan options of the current render
    fn interaction(&self) -> Option<ZoomOptions> {
        let controller = self.controller.borrow();
        let render = controller.current()?;
        Some(render.config.zoom_options().clone())
    }

    /// Mutate the viewport and redraw
    fn update_viewport(&self, f: impl FnOnce(&mut Viewport)) {
        if let Some(mut viewport) = self.viewport.get() {
            f(&mut viewport);
            self.viewport.set(Some(viewport));
            self.redraw.update(|n| *n += 1);
        }
    }
}

/// Chart slot component
#[component]
pub fn Chart(id: ChartSlotId) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();

    let handle = ChartHandle {
        controller: Rc::new(RefCell::new(ChartController::with_config(id.clone(), &state.config))),
        viewport: Rc::new(Cell::new(None)),
        redraw: create_rw_signal(0),
    };
    let selected = create_rw_signal(handle.controller.borrow().selection().sensors.clone());
    let drag: Rc<Cell<Option<(f64, f64)>>> = Rc::new(Cell::new(None));
    let pinch: Rc<Cell<Option<f64>>> = Rc::new(Cell::new(None));

    // Rebuild whenever the dashboard regenerates its data
    {
        let handle = handle.clone();
        let state = state.clone();
        create_effect(move |_| {
            let data = state.data.get();
            let result = handle.controller.borrow_mut().on_data_regenerated(&data);
            match result {
                Ok(command) => handle.apply(command),
                Err(e) => state.show_error(&e.to_string()),
            }
        });
    }

    // Redraw on every render change and once the canvas is mounted
    {
        let handle = handle.clone();
        create_effect(move |_| {
            let _ = handle.redraw.get();
            if let Some(canvas) = canvas_ref.get() {
                let controller = handle.controller.borrow();
                if let (Some(render), Some(viewport)) =
                    (controller.current(), handle.viewport.get())
                {
                    draw_chart(&canvas, &render.config, &viewport);
                }
            }
        });
    }

    {
        let id = id.clone();
        on_cleanup(move || {
            tracing::debug!("{} detached", id);
        });
    }

    let on_result = {
        let handle = handle.clone();
        let state = state.clone();
        move |result: DashboardResult<RenderCommand>| {
            match result {
                Ok(command) => handle.apply(command),
                Err(e) => state.show_error(&e.to_string()),
            }
            // Keep the controls in step with the controller, even on refusal
            selected.set(handle.controller.borrow().selection().sensors.clone());
        }
    };

    let sensor_toggles = SensorType::all()
        .iter()
        .copied()
        .map(|sensor| {
            let handle = handle.clone();
            let state = state.clone();
            let on_result = on_result.clone();
            view! {
                <label class="flex items-center space-x-1 text-sm text-gray-300 cursor-pointer">
                    <input
                        type="checkbox"
                        class="accent-blue-500"
                        prop:checked=move || selected.get().contains(&sensor)
                        on:change=move |_| {
                            let data = state.data.get_untracked();
                            let result =
                                handle.controller.borrow_mut().toggle_sensor(sensor, &data);
                            on_result(result);
                        }
                    />
                    <span class="capitalize">{sensor.as_str()}</span>
                </label>
            }
        })
        .collect_view();

    let initial_type = handle.controller.borrow().selection().chart_type;
    let on_type_change = {
        let handle = handle.clone();
        let state = state.clone();
        let on_result = on_result.clone();
        move |ev: web_sys::Event| {
            let value = event_target_value(&ev);
            let result = value.parse::<ChartType>().and_then(|chart_type| {
                let data = state.data.get_untracked();
                handle.controller.borrow_mut().set_chart_type(chart_type, &data)
            });
            on_result(result);
        }
    };

    let (palette, initial_hex) = {
        let controller = handle.controller.borrow();
        (
            controller.palette().colors().to_vec(),
            controller.selection().color.hex.clone(),
        )
    };
    let on_color_change = {
        let handle = handle.clone();
        move |ev: web_sys::Event| {
            let value = event_target_value(&ev);
            let result = handle.controller.borrow_mut().set_color_by_key(&value);
            on_result(result);
        }
    };

    let on_remove = {
        let state = state.clone();
        let id = id.clone();
        move |_| state.remove_chart_by_id(&id)
    };

    let on_wheel = {
        let handle = handle.clone();
        move |ev: web_sys::WheelEvent| {
            let Some(speed) = handle.interaction().and_then(|zoom| zoom.wheel_speed()) else {
                return;
            };
            let Some(canvas) = canvas_ref.get_untracked() else {
                return;
            };
            ev.prevent_default();
            let factor = wheel_factor(ev.delta_y(), speed);
            let (fx, fy) = PlotArea::of(&canvas).fraction_at(
                &canvas,
                ev.offset_x() as f64,
                ev.offset_y() as f64,
            );
            handle.update_viewport(|viewport| {
                let anchor_x = viewport.x.value_at(fx);
                let anchor_y = viewport.y.value_at(fy);
                viewport.zoom(factor, anchor_x, anchor_y);
            });
        }
    };

    let on_mouse_down = {
        let drag = drag.clone();
        let handle = handle.clone();
        move |ev: web_sys::MouseEvent| {
            if handle.interaction().is_some_and(|zoom| zoom.pan_enabled()) {
                drag.set(Some((ev.offset_x() as f64, ev.offset_y() as f64)));
            }
        }
    };

    let on_mouse_move = {
        let drag = drag.clone();
        let handle = handle.clone();
        move |ev: web_sys::MouseEvent| {
            let (Some((last_x, last_y)), Some(canvas)) = (drag.get(), canvas_ref.get_untracked())
            else {
                return;
            };
            let (x, y) = (ev.offset_x() as f64, ev.offset_y() as f64);
            drag.set(Some((x, y)));

            let area = PlotArea::of(&canvas);
            let (scale_x, scale_y) = PlotArea::css_scale(&canvas);
            let dx_px = (x - last_x) * scale_x;
            let dy_px = (y - last_y) * scale_y;
            handle.update_viewport(|viewport| {
                let dx = -dx_px / area.width * viewport.x.span();
                let dy = dy_px / area.height * viewport.y.span();
                viewport.pan(dx, dy);
            });
        }
    };

    let on_drag_end = {
        let drag = drag.clone();
        move |_: web_sys::MouseEvent| drag.set(None)
    };

    let on_touch_start = {
        let pinch = pinch.clone();
        let handle = handle.clone();
        move |ev: web_sys::TouchEvent| {
            let enabled = handle
                .interaction()
                .is_some_and(|zoom| zoom.pinch_enabled());
            let start = touch_pair(&ev).filter(|_| enabled);
            pinch.set(start.map(|(a, b)| distance(a, b)));
        }
    };

    let on_touch_move = {
        let pinch = pinch.clone();
        let handle = handle.clone();
        move |ev: web_sys::TouchEvent| {
            let (Some(previous), Some((a, b)), Some(canvas)) =
                (pinch.get(), touch_pair(&ev), canvas_ref.get_untracked())
            else {
                return;
            };
            ev.prevent_default();

            let current = distance(a, b);
            pinch.set(Some(current));

            let rect = canvas.get_bounding_client_rect();
            let mid_x = (a.0 + b.0) / 2.0 - rect.left();
            let mid_y = (a.1 + b.1) / 2.0 - rect.top();
            let (fx, fy) = PlotArea::of(&canvas).fraction_at(&canvas, mid_x, mid_y);
            handle.update_viewport(|viewport| {
                let anchor_x = viewport.x.value_at(fx);
                let anchor_y = viewport.y.value_at(fy);
                viewport.zoom(pinch_factor(previous, current), anchor_x, anchor_y);
            });
        }
    };

    let on_touch_end = {
        let pinch = pinch.clone();
        move |ev: web_sys::TouchEvent| {
            if touch_pair(&ev).is_none() {
                pinch.set(None);
            }
        }
    };

    let on_double_click = {
        let handle = handle.clone();
        move |_: web_sys::MouseEvent| handle.update_viewport(|viewport| viewport.reset())
    };

    view! {
        <div class="bg-gray-800 rounded-xl p-4 space-y-3">
            <div class="flex items-center justify-between">
                <h3 class="text-sm font-semibold text-gray-400 uppercase tracking-wide">
                    {id.to_string()}
                </h3>
                <button
                    on:click=on_remove
                    class="px-3 py-1 rounded-lg text-sm bg-gray-700 text-gray-300 hover:bg-red-600 hover:text-white transition-colors"
                    title="Remove chart"
                >
                    "Remove"
                </button>
            </div>

            <div class="flex flex-wrap items-center gap-4">
                <div class="flex items-center space-x-3">{sensor_toggles}</div>

                <select
                    on:change=on_type_change
                    class="bg-gray-700 text-gray-200 text-sm rounded-lg px-2 py-1"
                >
                    {ChartType::all()
                        .iter()
                        .map(|chart_type| {
                            let is_selected = *chart_type == initial_type;
                            view! {
                                <option value=chart_type.as_str() selected=is_selected>
                                    {chart_type.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>

                <select
                    on:change=on_color_change
                    class="bg-gray-700 text-gray-200 text-sm rounded-lg px-2 py-1"
                >
                    {palette
                        .into_iter()
                        .map(|color| {
                            let is_selected = color.hex == initial_hex;
                            view! {
                                <option value=color.hex.clone() selected=is_selected>
                                    {color.name}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <canvas
                node_ref=canvas_ref
                width=CANVAS_WIDTH
                height=CANVAS_HEIGHT
                class="w-full h-64 rounded-lg cursor-grab touch-none"
                on:wheel=on_wheel
                on:mousedown=on_mouse_down
                on:mousemove=on_mouse_move
                on:mouseup=on_drag_end.clone()
                on:mouseleave=on_drag_end
                on:dblclick=on_double_click
                on:touchstart=on_touch_start
                on:touchmove=on_touch_move
                on:touchend=on_touch_end.clone()
                on:touchcancel=on_touch_end
            />
        </div>
    }
}

/// Plot region of the canvas, in canvas pixels
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl PlotArea {
    const MARGIN_LEFT: f64 = 50.0;
    const MARGIN_RIGHT: f64 = 20.0;
    const MARGIN_TOP: f64 = 20.0;
    const MARGIN_BOTTOM: f64 = 40.0;

    fn of(canvas: &HtmlCanvasElement) -> Self {
        let width = canvas.width() as f64;
        let height = canvas.height() as f64;
        Self {
            left: Self::MARGIN_LEFT,
            top: Self::MARGIN_TOP,
            width: (width - Self::MARGIN_LEFT - Self::MARGIN_RIGHT).max(1.0),
            height: (height - Self::MARGIN_TOP - Self::MARGIN_BOTTOM).max(1.0),
        }
    }

    /// Canvas pixels per CSS pixel
    fn css_scale(canvas: &HtmlCanvasElement) -> (f64, f64) {
        let scale = |pixels: u32, css: i32| {
            if css > 0 {
                pixels as f64 / css as f64
            } else {
                1.0
            }
        };
        (
            scale(canvas.width(), canvas.client_width()),
            scale(canvas.height(), canvas.client_height()),
        )
    }

    /// Window fractions under a CSS pixel offset, y growing upwards
    fn fraction_at(&self, canvas: &HtmlCanvasElement, offset_x: f64, offset_y: f64) -> (f64, f64) {
        let (scale_x, scale_y) = Self::css_scale(canvas);
        let x = offset_x * scale_x;
        let y = offset_y * scale_y;
        (
            ((x - self.left) / self.width).clamp(0.0, 1.0),
            (1.0 - (y - self.top) / self.height).clamp(0.0, 1.0),
        )
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Client positions of the first two touches, if at least two are down
fn touch_pair(ev: &web_sys::TouchEvent) -> Option<((f64, f64), (f64, f64))> {
    let touches = ev.touches();
    if touches.length() < 2 {
        return None;
    }
    let a = touches.get(0)?;
    let b = touches.get(1)?;
    Some((
        (a.client_x() as f64, a.client_y() as f64),
        (b.client_x() as f64, b.client_y() as f64),
    ))
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, config: &ChartConfiguration, viewport: &Viewport) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let area = PlotArea::of(canvas);

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    // Horizontal grid lines with y-axis labels
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    ctx.set_text_align("left");
    for i in 0..=5 {
        let y = area.top + (i as f64 / 5.0) * area.height;
        ctx.begin_path();
        ctx.move_to(area.left, y);
        ctx.line_to(area.right(), y);
        ctx.stroke();

        let value = viewport.y.value_at(1.0 - i as f64 / 5.0);
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }

    let has_data = config.point_count() > 0
        && config.data.datasets.iter().any(|dataset| !dataset.data.is_empty());
    if !has_data {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        ctx.set_text_align("center");
        let _ = ctx.fill_text("No data for selected range", width / 2.0, height / 2.0);
        return;
    }

    // Point i sits in the middle of x unit [i, i + 1]
    let to_px = |index: usize, value: f64| {
        let x = area.left + viewport.x.fraction(index as f64 + 0.5) * area.width;
        let y = area.top + (1.0 - viewport.y.fraction(value)) * area.height;
        (x, y)
    };
    let visible = viewport.visible_indices(config.point_count());
    let unit_px = area.width / viewport.x.span().max(f64::EPSILON);
    let color = config.options.border_color.as_str();

    ctx.save();
    ctx.begin_path();
    ctx.rect(area.left, area.top, area.width, area.height);
    ctx.clip();

    let dataset_count = config.data.datasets.len();
    for (idx, dataset) in config.data.datasets.iter().enumerate() {
        // One color per chart; datasets are told apart by opacity
        ctx.set_global_alpha((1.0 - idx as f64 * 0.3).max(0.3));
        ctx.set_stroke_style(&color.into());
        ctx.set_fill_style(&color.into());

        let end = visible.end.min(dataset.data.len());
        let start = visible.start.min(end);
        if start == end {
            continue;
        }

        match config.chart_type {
            ChartType::Line => {
                // Include one neighbor on each side so lines run off the edges
                let from = start.saturating_sub(1);
                let to = (end + 1).min(dataset.data.len());
                let points: Vec<(f64, f64)> =
                    (from..to).map(|i| to_px(i, dataset.data[i])).collect();
                draw_line(&ctx, &points, dataset.tension);
            }
            ChartType::Bar => {
                let slot = unit_px * 0.8 / dataset_count.max(1) as f64;
                let baseline = to_px(0, 0.0).1.min(area.bottom());
                for i in start..end {
                    let (x, y) = to_px(i, dataset.data[i]);
                    let left = x - unit_px * 0.4 + idx as f64 * slot;
                    ctx.fill_rect(left, y, slot.max(1.0), baseline - y);
                }
            }
            ChartType::Scatter => {
                for i in start..end {
                    let (x, y) = to_px(i, dataset.data[i]);
                    ctx.begin_path();
                    let _ = ctx.arc(x, y, 3.0, 0.0, PI * 2.0);
                    ctx.fill();
                }
            }
        }
    }

    ctx.restore();
    ctx.set_global_alpha(1.0);

    // X-axis date labels, at most six across the visible window
    ctx.set_fill_style(&"#9ca3af".into());
    ctx.set_font("12px sans-serif");
    ctx.set_text_align("center");
    let count = visible.len();
    let step = (count / 6).max(1);
    for i in visible.step_by(step) {
        if let Some(label) = config.data.labels.get(i) {
            let (x, _) = to_px(i, 0.0);
            let _ = ctx.fill_text(label, x, height - 10.0);
        }
    }

    // Legend
    ctx.set_text_align("left");
    let mut legend_x = area.left;
    for (idx, dataset) in config.data.datasets.iter().enumerate() {
        ctx.set_global_alpha((1.0 - idx as f64 * 0.3).max(0.3));
        ctx.set_fill_style(&color.into());
        ctx.fill_rect(legend_x, 6.0, 10.0, 10.0);
        ctx.set_global_alpha(1.0);
        ctx.set_fill_style(&"#d1d5db".into()); // gray-300
        let _ = ctx.fill_text(&dataset.label, legend_x + 14.0, 15.0);
        legend_x += 14.0 + dataset.label.len() as f64 * 7.0 + 16.0;
    }
}

/// Stroke a line through `points`, curved by `tension`
fn draw_line(ctx: &CanvasRenderingContext2d, points: &[(f64, f64)], tension: f64) {
    let Some(&(x0, y0)) = points.first() else {
        return;
    };

    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(x0, y0);
    for i in 1..points.len() {
        let prev = points[i - 1];
        let curr = points[i];
        let before = points[i.saturating_sub(2)];
        let after = points[(i + 1).min(points.len() - 1)];

        let cp1 = (prev.0 + (curr.0 - before.0) * tension, prev.1 + (curr.1 - before.1) * tension);
        let cp2 = (curr.0 - (after.0 - prev.0) * tension, curr.1 - (after.1 - prev.1) * tension);
        ctx.bezier_curve_to(cp1.0, cp1.1, cp2.0, cp2.1, curr.0, curr.1);
    }
    ctx.stroke();

    // Points
    for &(x, y) in points {
        ctx.begin_path();
        let _ = ctx.arc(x, y, 2.5, 0.0, PI * 2.0);
        ctx.fill();
    }
}
