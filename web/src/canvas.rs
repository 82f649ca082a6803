use raspadinha_core::{CardGeometry, Cell, RevealShape, ScratchSurface, SurfaceRect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const BACKDROP_COLOR: &str = "#ffffff";
const CELL_COLOR: &str = "#f0f0f0";
const BORDER_COLOR: &str = "#cccccc";
const INK_COLOR: &str = "#000000";
const WINNING_INK_COLOR: &str = "#ff0000";
const FOIL_COLOR: &str = "#666666";
const SPECKLE_COLOR: &str = "#777777";
const SPECKLES_PER_CELL: u32 = 5;

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

/// Offscreen canvas plus its 2d context.
#[derive(Debug)]
struct Layer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Layer {
    fn create() -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = gloo::utils::document()
            .create_element("canvas")?
            .dyn_into()
            .map_err(JsValue::from)?;
        let ctx = context_2d(&canvas)?;
        Ok(Self { canvas, ctx })
    }

    fn resize(&self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    fn clear(&self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
    }
}

/// The on-screen canvas composed from two offscreen layers: cell content
/// below, scratch foil above. Erasing punches alpha-zero holes into the
/// foil layer; sampling counts them.
#[derive(Debug)]
pub(crate) struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    content: Layer,
    mask: Layer,
}

impl CanvasSurface {
    pub(crate) fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = context_2d(&canvas)?;
        Ok(Self {
            canvas,
            ctx,
            content: Layer::create()?,
            mask: Layer::create()?,
        })
    }

    /// Blits both layers to the screen. Call after anything changed.
    pub(crate) fn compose(&self) {
        if let Err(err) = self.try_compose() {
            log::error!("compose failed: {:?}", err);
        }
    }

    fn try_compose(&self) -> Result<(), JsValue> {
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());
        self.ctx.clear_rect(0.0, 0.0, width, height);
        self.ctx
            .draw_image_with_html_canvas_element(&self.content.canvas, 0.0, 0.0)?;
        self.ctx
            .draw_image_with_html_canvas_element(&self.mask.canvas, 0.0, 0.0)?;
        Ok(())
    }

    fn try_draw_background(
        &mut self,
        geometry: &CardGeometry,
        winning_number: u8,
    ) -> Result<(), JsValue> {
        let width = geometry.surface_width();
        let height = geometry.surface_height();
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.content.resize(width, height);
        self.mask.resize(width, height);
        self.content.clear();
        self.mask.clear();

        let ctx = &self.content.ctx;
        ctx.set_fill_style_str(BACKDROP_COLOR);
        ctx.fill_rect(0.0, 0.0, width, height);

        ctx.set_fill_style_str(INK_COLOR);
        ctx.set_font("bold 24px sans-serif");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text(
            &format!("Winning number: {}", winning_number),
            width / 2.0,
            geometry.header_height / 2.0,
        )?;
        Ok(())
    }

    fn try_draw_cell_content(
        &mut self,
        cell: &Cell,
        rect: SurfaceRect,
        winning: bool,
    ) -> Result<(), JsValue> {
        let ctx = &self.content.ctx;
        ctx.set_fill_style_str(CELL_COLOR);
        ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
        ctx.set_stroke_style_str(BORDER_COLOR);
        ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);

        let center_x = rect.x + rect.width / 2.0;
        let center_y = rect.y + rect.height / 2.0;
        ctx.set_fill_style_str(if winning { WINNING_INK_COLOR } else { INK_COLOR });
        ctx.set_font("bold 24px sans-serif");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text(&cell.number().to_string(), center_x, center_y)?;

        if winning {
            if let Some(reward) = cell.reward() {
                ctx.set_fill_style_str(WINNING_INK_COLOR);
                ctx.set_font("14px sans-serif");
                ctx.fill_text(reward, center_x, center_y + 20.0)?;
            }
        }
        Ok(())
    }

    fn try_composite_mask(
        &mut self,
        region: SurfaceRect,
        shape: RevealShape,
        erase: bool,
    ) -> Result<(), JsValue> {
        use std::f64::consts::TAU;

        let ctx = &self.mask.ctx;
        ctx.save();
        ctx.begin_path();
        ctx.rect(region.x, region.y, region.width, region.height);
        ctx.clip();
        ctx.set_global_composite_operation(if erase {
            "destination-out"
        } else {
            "source-over"
        })?;

        match shape {
            RevealShape::Region => {
                ctx.set_fill_style_str(FOIL_COLOR);
                ctx.fill_rect(region.x, region.y, region.width, region.height);
                if !erase {
                    // speckle texture so the foil reads as scratchable
                    ctx.set_fill_style_str(SPECKLE_COLOR);
                    for _ in 0..SPECKLES_PER_CELL {
                        ctx.fill_rect(
                            region.x + js_sys::Math::random() * region.width,
                            region.y + js_sys::Math::random() * region.height,
                            2.0,
                            2.0,
                        );
                    }
                }
            }
            RevealShape::Dab { center, radius } => {
                ctx.begin_path();
                ctx.arc(center.0, center.1, radius, 0.0, TAU)?;
                ctx.fill();
            }
            RevealShape::Stroke { from, to, width } => {
                ctx.begin_path();
                ctx.move_to(from.0, from.1);
                ctx.line_to(to.0, to.1);
                ctx.set_line_width(width);
                ctx.set_line_cap("round");
                ctx.set_line_join("round");
                ctx.stroke();
            }
        }

        ctx.restore();
        Ok(())
    }
}

impl ScratchSurface for CanvasSurface {
    fn draw_background(&mut self, geometry: &CardGeometry, winning_number: u8) {
        if let Err(err) = self.try_draw_background(geometry, winning_number) {
            log::error!("background draw failed: {:?}", err);
        }
    }

    fn draw_cell_content(&mut self, cell: &Cell, rect: SurfaceRect, winning: bool) {
        if let Err(err) = self.try_draw_cell_content(cell, rect, winning) {
            log::error!("cell draw failed: {:?}", err);
        }
    }

    fn composite_mask(&mut self, region: SurfaceRect, shape: RevealShape, erase: bool) {
        if let Err(err) = self.try_composite_mask(region, shape, erase) {
            log::error!("mask compositing failed: {:?}", err);
        }
    }

    fn sample_erased_fraction(&self, region: SurfaceRect) -> f32 {
        match self
            .mask
            .ctx
            .get_image_data(region.x, region.y, region.width, region.height)
        {
            Ok(data) => {
                let pixels = data.data();
                let erased = pixels
                    .iter()
                    .skip(3)
                    .step_by(4)
                    .filter(|&&alpha| alpha == 0)
                    .count();
                erased as f32 / region.area() as f32
            }
            Err(err) => {
                log::error!("mask sampling failed: {:?}", err);
                0.0
            }
        }
    }
}
