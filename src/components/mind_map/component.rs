use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::{DiagramState, filter_nodes};
use super::types::{DiagramData, DiagramNode};

type SharedState = Rc<RefCell<Option<DiagramState>>>;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

const FALLBACK_WIDTH: f64 = 800.0;
const FALLBACK_HEIGHT: f64 = 600.0;

/// `requestAnimationFrame` loop that lets go of its closure once stopped.
#[derive(Clone)]
struct FrameLoop {
	slot: FrameSlot,
	alive: Arc<AtomicBool>,
}

impl FrameLoop {
	fn new() -> Self {
		Self {
			slot: Rc::new(RefCell::new(None)),
			alive: Arc::new(AtomicBool::new(true)),
		}
	}

	/// Flag the loop checks every frame; clearing it stops the loop.
	fn alive_flag(&self) -> Arc<AtomicBool> {
		self.alive.clone()
	}

	fn is_running(&self) -> bool {
		self.slot.borrow().is_some()
	}

	fn start(&self, mut frame: impl FnMut() + 'static) {
		let (slot, alive) = (self.slot.clone(), self.alive.clone());
		*self.slot.borrow_mut() = Some(Closure::new(move || {
			if !alive.load(Ordering::Relaxed) {
				// break the slot <-> closure cycle; drop outside this call
				if let Some(done) = slot.borrow_mut().take() {
					spawn_local(async move { drop(done) });
				}
				debug!("mind map: render loop stopped");
				return;
			}
			frame();
			request_frame(&slot);
		}));
		request_frame(&self.slot);
	}
}

fn request_frame(slot: &FrameSlot) {
	if let (Some(cb), Some(win)) = (slot.borrow().as_ref(), web_sys::window()) {
		let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn with_state<R>(state: &SharedState, f: impl FnOnce(&mut DiagramState) -> R) -> Option<R> {
	state.borrow_mut().as_mut().map(f)
}

/// Interactive mind map: canvas, search box, zoom controls and a details
/// panel for the selected node.
#[component]
pub fn MindMap(
	#[prop(into)] data: Signal<DiagramData>,
	#[prop(optional)] on_node_select: Option<Callback<DiagramNode>>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let frames = FrameLoop::new();

	let search = RwSignal::new(String::new());
	let zoom = RwSignal::new(1.0_f64);
	let selected = RwSignal::new(Option::<DiagramNode>::None);

	let alive = frames.alive_flag();
	on_cleanup(move || alive.store(false, Ordering::Relaxed));

	let state_init = state.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if frames.is_running() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let w = width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.filter(|w| *w > 0.0)
				.unwrap_or(FALLBACK_WIDTH)
		});
		let h = height.unwrap_or(FALLBACK_HEIGHT);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::warn!("mind map: 2d canvas context unavailable");
			return;
		};

		let mut initial = DiagramState::new(data.get_untracked(), w, h);
		initial.set_search(&search.get_untracked());
		*state_init.borrow_mut() = Some(initial);

		let state_anim = state_init.clone();
		frames.start(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.take_dirty() {
					render::render(s, &ctx);
				}
			}
		});
	});

	// a new payload replaces the old one and starts from a clean view
	let state_data = state.clone();
	Effect::new(move |_| {
		let next = data.get();
		debug!(
			"mind map payload: {} nodes, {} edges",
			next.nodes.len(),
			next.edges.len()
		);
		with_state(&state_data, |s| s.set_data(next));
		selected.set(None);
		zoom.set(1.0);
	});

	let counts = Memo::new(move |_| {
		search.with(|needle| data.with(|d| (filter_nodes(&d.nodes, needle).len(), d.nodes.len())))
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		let picked = with_state(&state_md, |s| match s.node_at_position(x, y) {
			Some(id) => s.select(&id).cloned(),
			None => {
				s.begin_pan(x, y);
				None
			}
		})
		.flatten();
		if let Some(node) = picked {
			debug!("mind map: selected {}", node.id);
			selected.set(Some(node.clone()));
			if let Some(cb) = on_node_select {
				cb.run(node);
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer(canvas_ref, &ev) {
			with_state(&state_mm, |s| s.drag_pan(x, y));
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		with_state(&state_mu, |s| s.end_pan());
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		with_state(&state_ml, |s| s.end_pan());
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		let delta_y = ev.delta_y();
		let k = with_state(&state_wh, |s| s.wheel_zoom(delta_y).then(|| s.zoom())).flatten();
		// horizontal swipes scroll the page as usual
		if let Some(k) = k {
			ev.prevent_default();
			zoom.set(k);
		}
	};

	let state_zi = state.clone();
	let on_zoom_in = move |_| {
		if let Some(k) = with_state(&state_zi, |s| {
			s.zoom_in();
			s.zoom()
		}) {
			zoom.set(k);
		}
	};

	let state_zo = state.clone();
	let on_zoom_out = move |_| {
		if let Some(k) = with_state(&state_zo, |s| {
			s.zoom_out();
			s.zoom()
		}) {
			zoom.set(k);
		}
	};

	let state_rv = state.clone();
	let on_reset = move |_| {
		with_state(&state_rv, |s| s.reset_view());
		zoom.set(1.0);
		selected.set(None);
	};

	let state_se = state.clone();
	let on_search = move |ev| {
		let value = event_target_value(&ev);
		with_state(&state_se, |s| s.set_search(&value));
		search.set(value);
	};

	let on_close = Callback::new(move |_: ()| selected.set(None));

	let state_sel = state.clone();
	Effect::new(move |_| {
		if selected.with(Option::is_none) {
			with_state(&state_sel, |s| s.clear_selection());
		}
	});

	view! {
		<div class="mind-map">
			<div class="mind-map-toolbar">
				<input
					type="search"
					placeholder="Search nodes..."
					prop:value=move || search.get()
					on:input=on_search
				/>
				<span class="mind-map-count">
					{move || {
						let (shown, total) = counts.get();
						format!("{shown} / {total} nodes")
					}}
				</span>
				<button title="Zoom out" on:click=on_zoom_out>"−"</button>
				<span class="mind-map-zoom">{move || format!("{:.0}%", zoom.get() * 100.0)}</span>
				<button title="Zoom in" on:click=on_zoom_in>"+"</button>
				<button on:click=on_reset>"Reset view"</button>
			</div>
			<div class="mind-map-stage" style="position: relative;">
				<canvas
					node_ref=canvas_ref
					class="mind-map-canvas"
					on:mousedown=on_mousedown
					on:mousemove=on_mousemove
					on:mouseup=on_mouseup
					on:mouseleave=on_mouseleave
					on:wheel=on_wheel
					style="display: block; cursor: grab;"
				/>
				{move || selected.get().map(|node| view! { <NodeDetails node=node on_close=on_close /> })}
			</div>
		</div>
	}
}

#[component]
fn NodeDetails(node: DiagramNode, on_close: Callback<()>) -> impl IntoView {
	let references = node.references.clone();
	view! {
		<aside
			class="mind-map-details"
			style="position: absolute; top: 8px; right: 8px; max-width: 280px; background: white; padding: 12px; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.15);"
		>
			<button class="close" title="Close" on:click=move |_| on_close.run(())>"×"</button>
			<h4>{node.label.clone()}</h4>
			<p class="category">{node.category.label()}</p>
			{node.description.clone().map(|d| view! { <p>{d}</p> })}
			{node
				.connections_count
				.map(|c| view! { <p class="connections">{format!("{c} connections")}</p> })}
			{(!references.is_empty())
				.then(|| {
					view! {
						<h5>"References"</h5>
						<ul>
							{references.into_iter().map(|r| view! { <li>{r}</li> }).collect_view()}
						</ul>
					}
				})}
		</aside>
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use std::cell::Cell;

	use gloo_timers::future::TimeoutFuture;
	use wasm_bindgen_test::*;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	#[wasm_bindgen_test]
	async fn stopped_loop_releases_its_closure() {
		let frames = FrameLoop::new();
		let ticks = Rc::new(Cell::new(0_u32));
		let counter = ticks.clone();
		frames.start(move || counter.set(counter.get() + 1));
		TimeoutFuture::new(100).await;
		assert!(frames.is_running());
		assert!(ticks.get() > 0);

		frames.alive_flag().store(false, Ordering::Relaxed);
		TimeoutFuture::new(100).await;
		assert!(!frames.is_running());
		let stopped_at = ticks.get();
		TimeoutFuture::new(100).await;
		assert_eq!(ticks.get(), stopped_at);
		// the frame callback and everything it captured are gone
		assert_eq!(Rc::strong_count(&ticks), 1);
	}
}
