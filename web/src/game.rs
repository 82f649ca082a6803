use crate::canvas::CanvasSurface;
use crate::settings::{Settings, SettingsView};
use crate::utils::*;
use clap::Args;
use raspadinha_core as card;
use raspadinha_core::{CardGenerator, ScratchOutcome, SurfacePoint};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, PointerEvent, ShareData};
use yew::prelude::*;

const SHARE_TITLE: &str = "Scratch card!";
const SHARE_TEXT: &str = "Try your luck and see what you can scratch out!";

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct CardProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) enum Msg {
    PointerDown(SurfacePoint),
    PointerMove(SurfacePoint),
    PointerUp,
    NewCard,
    ToggleSettings,
    Share,
    ShareDone(bool),
}

fn new_engine(settings: &Settings, seed: u64) -> card::ScratchEngine {
    let rules = settings.to_rules();
    let deck = card::RandomCardGenerator::new(seed).generate(&rules);
    log::debug!(
        "new card: winning number {}, {} winning cells",
        deck.winning_number(),
        deck.winning_cell_count()
    );
    card::ScratchEngine::new(deck)
}

/// Scale-corrected surface coordinates for a pointer event on the canvas.
fn pointer_position(event: &PointerEvent) -> Option<SurfacePoint> {
    let canvas: HtmlCanvasElement = event.target()?.dyn_into().ok()?;
    let rect = canvas.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    let scale_x = f64::from(canvas.width()) / rect.width();
    let scale_y = f64::from(canvas.height()) / rect.height();
    Some((
        (f64::from(event.client_x()) - rect.left()) * scale_x,
        (f64::from(event.client_y()) - rect.top()) * scale_y,
    ))
}

#[derive(Debug)]
pub(crate) struct CardView {
    settings: Settings,
    engine: card::ScratchEngine,
    surface: Option<CanvasSurface>,
    canvas_ref: NodeRef,
    scratching: bool,
    last_point: SurfacePoint,
    settings_open: bool,
    share_status: Option<bool>,
}

impl CardView {
    fn present(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            self.engine.present(surface);
            surface.compose();
        }
    }

    fn apply_scratch(
        &mut self,
        scratch: impl FnOnce(&mut card::ScratchEngine, &mut CanvasSurface) -> ScratchOutcome,
    ) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let outcome = scratch(&mut self.engine, surface);
        if outcome.has_update() {
            surface.compose();
        }
        // the reward line only changes when a cell clears
        matches!(outcome, ScratchOutcome::Cleared)
    }

    fn share(&mut self, ctx: &Context<Self>) -> bool {
        let window = gloo::utils::window();
        let navigator = window.navigator();
        if !js_sys::Reflect::has(&navigator, &JsValue::from_str("share")).unwrap_or(false) {
            log::warn!("share API not available");
            self.share_status = Some(false);
            return true;
        }

        let data = ShareData::new();
        data.set_title(SHARE_TITLE);
        data.set_text(SHARE_TEXT);
        if let Ok(href) = window.location().href() {
            data.set_url(&href);
        }

        let promise = navigator.share_with_data(&data);
        let link = ctx.link().clone();
        wasm_bindgen_futures::spawn_local(async move {
            let shared = wasm_bindgen_futures::JsFuture::from(promise).await.is_ok();
            log::debug!("share finished: {}", shared);
            link.send_message(Msg::ShareDone(shared));
        });
        false
    }
}

impl Component for CardView {
    type Message = Msg;
    type Properties = CardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let settings: Settings = LocalOrDefault::local_or_default();
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        let engine = new_engine(&settings, seed);
        Self {
            settings,
            engine,
            surface: None,
            canvas_ref: NodeRef::default(),
            scratching: false,
            last_point: (0.0, 0.0),
            settings_open: false,
            share_status: None,
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        let canvas = self
            .canvas_ref
            .cast::<HtmlCanvasElement>()
            .expect("canvas element must be mounted");
        let surface = CanvasSurface::new(canvas).expect("Could not create canvas surface");
        self.surface = Some(surface);
        self.present();
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::PointerDown(point) => {
                log::trace!("pointer down at {:?}", point);
                self.scratching = true;
                self.last_point = point;
                self.apply_scratch(|engine, surface| engine.scratch_dab(surface, point))
            }
            Msg::PointerMove(point) => {
                if !self.scratching {
                    return false;
                }
                let from = self.last_point;
                self.last_point = point;
                self.apply_scratch(|engine, surface| engine.scratch_stroke(surface, from, point))
            }
            Msg::PointerUp => {
                log::trace!("pointer up");
                self.scratching = false;
                false
            }
            Msg::NewCard => {
                self.engine = new_engine(&self.settings, js_random_seed());
                self.scratching = false;
                self.share_status = None;
                self.present();
                true
            }
            Msg::ToggleSettings => {
                self.settings_open = !self.settings_open;
                if !self.settings_open {
                    // new odds take effect on the next card, never mid-card
                    let settings: Settings = LocalOrDefault::local_or_default();
                    if self.settings != settings {
                        self.settings = settings;
                        self.engine = new_engine(&self.settings, js_random_seed());
                        self.present();
                    }
                }
                true
            }
            Msg::Share => self.share(ctx),
            Msg::ShareDone(shared) => {
                self.share_status = Some(shared);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onpointerdown = ctx.link().batch_callback(|e: PointerEvent| {
            e.prevent_default();
            pointer_position(&e).map(Msg::PointerDown)
        });
        let onpointermove = ctx.link().batch_callback(|e: PointerEvent| {
            e.prevent_default();
            pointer_position(&e).map(Msg::PointerMove)
        });
        let onpointerup = ctx.link().callback(|_: PointerEvent| Msg::PointerUp);
        let onpointerleave = ctx.link().callback(|_: PointerEvent| Msg::PointerUp);
        let cb_new_card = ctx.link().callback(|_| Msg::NewCard);
        let cb_share = ctx.link().callback(|_| Msg::Share);
        let cb_show_settings = ctx.link().callback(|_| Msg::ToggleSettings);
        let onclose_settings = ctx.link().callback(|()| Msg::ToggleSettings);

        let found: Vec<&str> = self.engine.card().revealed_rewards().collect();

        html! {
            <div class="raspadinha">
                <small onclick={cb_show_settings}>{"···"}</small>
                <canvas
                    ref={self.canvas_ref.clone()}
                    {onpointerdown}
                    {onpointermove}
                    {onpointerup}
                    {onpointerleave}
                />
                <nav>
                    <button onclick={cb_new_card}>{"New card"}</button>
                    <button onclick={cb_share}>{"Share"}</button>
                </nav>
                if !found.is_empty() {
                    <aside class="rewards">
                        { for found.iter().map(|reward| html! { <span>{*reward}</span> }) }
                    </aside>
                }
                if let Some(shared) = self.share_status {
                    <p class="share">{ if shared { "Shared!" } else { "Sharing failed" } }</p>
                }
                <SettingsView open={self.settings_open} onclose={onclose_settings}/>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_seed_one_card() {
        let settings = Settings::default();
        let a = new_engine(&settings, 42);
        let b = new_engine(&settings, 42);
        assert_eq!(a.card(), b.card());
    }

    #[test]
    fn engines_start_with_nothing_revealed() {
        let engine = new_engine(&Settings::default(), 7);
        assert_eq!(engine.card().revealed_rewards().count(), 0);
        assert!(engine.card().winning_cell_count() >= 1);
    }

    #[test]
    fn settings_overrides_shape_the_generated_card() {
        // a point-mass table pins the winning-cell count
        let settings = Settings {
            win_count_weights: Some(vec![0.0, 0.0, 0.0, 0.0, 0.0, 100.0]),
            reward_weights: None,
        };
        for seed in 0..8 {
            let engine = new_engine(&settings, seed);
            assert_eq!(engine.card().winning_cell_count(), 5);
        }
    }
}
