//! pixcanvas studio: a window with one autozoomed canvas showing every shape
//! kind.
//!
//! Usage: `pixcanvas-studio [FONT_SHEET.png]`. Without a font sheet the text
//! line is skipped.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use pixcanvas_engine::assets::{AssetRequest, FontId, PictureId};
use pixcanvas_engine::atlas::IndexedImage;
use pixcanvas_engine::core::{App, AppControl, FrameCtx};
use pixcanvas_engine::device::GpuInit;
use pixcanvas_engine::logging::{init_logging, LoggingConfig};
use pixcanvas_engine::palette::c64;
use pixcanvas_engine::window::{Runtime, RuntimeConfig};
use pixcanvas_engine::{CanvasConfig, CanvasId, Color, ColorIndex, Palette, Pixel, PixelContext};

const WIDTH: i16 = 320;
const HEIGHT: i16 = 180;

struct Studio {
    ctx: PixelContext,
    canvas: CanvasId,
    sprite: PictureId,
    font: Option<FontId>,
}

impl Studio {
    fn new(font_path: Option<PathBuf>) -> Result<Self> {
        let mut ctx = PixelContext::with_palette(Palette::c64());

        let canvas = ctx.create_canvas(
            CanvasConfig::default()
                .name("main")
                .resolution(WIDTH, HEIGHT)
                .autozoom(),
        )?;

        let sprite = ctx.assets_mut().register_picture("sprite", &sprite())?;

        let font = match font_path {
            Some(path) => {
                let report = ctx
                    .assets_mut()
                    .load_all(&[AssetRequest::Font { name: "font".into(), path }]);
                report.fonts.first().map(|(_, id)| *id)
            }
            None => {
                log::info!("no font sheet given; text disabled");
                None
            }
        };

        Ok(Self { ctx, canvas, sprite, font })
    }

    /// Records this frame's shapes.
    fn draw(&mut self) {
        let frame = self.ctx.frame();
        let t = (frame % 240) as i16;
        let sprite = self.sprite;

        let Some(canvas) = self.ctx.canvas_mut(self.canvas) else {
            return;
        };
        let size = canvas.size();
        let (w, h) = (size.x, size.y);

        canvas.clear(c64::BLUE);
        canvas.draw_box(c64::LIGHT_BLUE, ColorIndex::TRANSPARENT, 0, 0, Pixel::new(0, 0), Pixel::new(w - 1, h - 1));
        canvas.draw_box(c64::WHITE, c64::DARK_GREY, 3, 1, Pixel::new(16, 40), Pixel::new(96, 100));
        canvas.draw_box(c64::YELLOW, c64::ORANGE, 0, 2, Pixel::new(60, 70), Pixel::new(130, 130));

        for i in 0..8 {
            let x = 150 + i * 8;
            canvas.draw_line(c64::LIGHT_GREEN, 0, Pixel::new(x, 40), Pixel::new(x + 30, 100));
        }

        canvas.draw_triangle(c64::RED, 3, Pixel::new(240, 120), Pixel::new(300, 160), Pixel::new(200, 165));
        canvas.draw_triangle(c64::CYAN, 2, Pixel::new(230, 100), Pixel::new(290, 110), Pixel::new(250, 150));

        for i in 0..16 {
            canvas.draw_point(c64::WHITE, 5, Pixel::new(20 + i * 4, 140 + (i % 3)));
        }

        let x = 8 + t;
        canvas.draw_picture(sprite, 4, Pixel::new(x, 150));
        canvas.draw_picture(sprite, 4, Pixel::new(w - 16 - t, 20));

        let Some(font) = self.font else { return };
        let Some(mut text) = self.ctx.text(self.canvas) else { return };
        text.text(c64::WHITE, font).locate(Pixel::new(16, 12));
        text.cursor().depth = 10;
        // TextWriter::write_str never fails; dropped glyphs show up in the batch count.
        let _ = write!(text, "PIXCANVAS\nframe {frame}");
    }
}

impl App for Studio {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            if event.state == ElementState::Pressed && event.physical_key == PhysicalKey::Code(KeyCode::Escape) {
                return AppControl::Exit;
            }
        }
        AppControl::Continue
    }

    fn on_resize(&mut self, size: Pixel) {
        self.ctx.resize(size);
    }

    fn on_frame(&mut self, frame: &mut FrameCtx<'_, '_>) -> AppControl {
        self.ctx.begin_frame();
        self.draw();

        let (ctx, canvas) = (&mut self.ctx, self.canvas);
        match frame.render(Color::opaque(0, 0, 0), |gpu| ctx.display(canvas, gpu)) {
            Ok(control) => control,
            Err(e) => {
                log::error!("frame failed: {e:#}");
                AppControl::Exit
            }
        }
    }
}

/// A 12×12 ring with a darker outline.
fn sprite() -> IndexedImage {
    let mut img = IndexedImage::new(12, 12);
    for y in 0..12u32 {
        for x in 0..12u32 {
            let (dx, dy) = (x as i32 * 2 - 11, y as i32 * 2 - 11);
            let d = dx * dx + dy * dy;
            let index = match d {
                0..=36 => 0,
                37..=81 => c64::YELLOW.0,
                82..=121 => c64::BROWN.0,
                _ => 0,
            };
            img.set(x, y, index);
        }
    }
    img
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let font_path = std::env::args_os().nth(1).map(PathBuf::from);
    let studio = Studio::new(font_path)?;

    Runtime::run(
        RuntimeConfig {
            title: "pixcanvas studio".to_string(),
            ..RuntimeConfig::default()
        },
        GpuInit::default(),
        studio,
    )
}
