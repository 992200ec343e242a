use crate::{
    assets::{bitmap::Bitmap, image::ImageHandle},
    foundation::error::SketchResult,
    paint::color::{BLACK, BLUE, Color, GRAY, GREEN, ORANGE, PINK, PURPLE, TEAL, WHITE, YELLOW},
    render::{surface::Surface, text::Font},
    sketch::{
        app::{Context, Sketch},
        random::Random,
    },
    sketches::FLOWER_PALETTE,
};

const INITIAL_FLOWERS: usize = 6;
const PETAL_COUNTS: [u32; 4] = [4, 5, 6, 8];
const BITMAP_SIDE: u32 = 100;
const BITMAP_SCALE: u32 = 3;
const BITMAP_PALETTE: [Color; 7] = [GRAY, ORANGE, YELLOW, BLUE, TEAL, PURPLE, PINK];
/// Degrees of bitmap spin per millisecond of frame interval.
const SPIN_PER_MS: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct Flower {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub petals: u32,
    pub color: Color,
}

impl Flower {
    fn random_at(rng: &mut Random, x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            size: rng.range(25.0, 50.0),
            petals: rng.pick(&PETAL_COUNTS).copied().unwrap_or(5),
            color: rng.pick(&FLOWER_PALETTE).copied().unwrap_or(WHITE),
        }
    }
}

/// Random flowers plus an orbiting, spinning pixel bitmap. Clicking plants a flower; hovering
/// over the right half greets the visitor.
#[derive(Debug, Default)]
pub struct Garden {
    flowers: Vec<Flower>,
    bitmap: Option<Bitmap>,
    picture: Option<ImageHandle>,
    font: Option<Font>,
    spin: f64,
}

impl Garden {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Image drawn in the top-right corner once it has loaded.
    pub fn with_picture(mut self, picture: ImageHandle) -> Self {
        self.picture = Some(picture);
        self
    }

    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }

    pub fn bitmap(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }

    fn random_bitmap(rng: &mut Random) -> SketchResult<Bitmap> {
        let mut bitmap = Bitmap::new(BITMAP_SIDE, BITMAP_SIDE)?;
        for y in 0..BITMAP_SIDE {
            for x in 0..BITMAP_SIDE {
                let c = rng.pick(&BITMAP_PALETTE).copied().unwrap_or(GRAY);
                bitmap.set(x, y, c);
            }
        }
        bitmap.scale(BITMAP_SCALE)?;
        bitmap.realize()?;
        Ok(bitmap)
    }
}

impl<S: Surface> Sketch<S> for Garden {
    fn setup(&mut self, ctx: &mut Context<'_, S>) -> SketchResult<()> {
        if let Some(font) = self.font.clone() {
            ctx.canvas.set_font(font);
        }
        let (w, h) = (f64::from(ctx.canvas.width()), f64::from(ctx.canvas.height()));
        for _ in 0..INITIAL_FLOWERS {
            let x = ctx.rng.range(50.0, w - 50.0);
            let y = ctx.rng.range(50.0, h - 50.0);
            self.flowers.push(Flower::random_at(ctx.rng, x, y));
        }
        self.bitmap = Some(Self::random_bitmap(ctx.rng)?);
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context<'_, S>) -> SketchResult<()> {
        let canvas = &mut *ctx.canvas;
        canvas.background(BLACK);
        canvas.no_stroke();

        for flower in &self.flowers {
            canvas.fill(flower.color);
            let step = 360.0 / f64::from(flower.petals);
            for i in 0..flower.petals {
                canvas.rotate(step * f64::from(i));
                canvas.ellipse(flower.x, flower.y, flower.size, flower.size / 2.0);
            }
            canvas.fill(GREEN);
            canvas.circle(flower.x, flower.y, 10.0);
        }

        canvas.rotate(0.0);
        if let Some(picture) = &self.picture {
            let x = f64::from(canvas.width()) - 110.0;
            canvas.image(picture, x, 10.0, Some(100.0), Some(100.0));
        }

        let interval_ms = ctx.frames.interval().as_secs_f64() * 1000.0;
        self.spin += interval_ms * SPIN_PER_MS;
        self.spin %= 360.0;
        canvas.rotate(self.spin);

        let t = ctx.frames.frame_count() as f64 * 0.04;
        if let Some(bitmap) = &self.bitmap {
            bitmap.present(canvas, 200.0 + t.sin() * 100.0, 200.0 + t.cos() * 100.0);
        }
        Ok(())
    }

    fn pointer_clicked(&mut self, ctx: &mut Context<'_, S>) -> SketchResult<()> {
        let flower = Flower::random_at(ctx.rng, ctx.pointer.x, ctx.pointer.y);
        self.flowers.push(flower);
        Ok(())
    }

    fn pointer_moved(&mut self, ctx: &mut Context<'_, S>) -> SketchResult<()> {
        if ctx.pointer.x > f64::from(ctx.canvas.width()) / 2.0 {
            ctx.canvas.fill(WHITE);
            ctx.canvas.text("HALLO", 50.0, 50.0, None);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sketches/garden.rs"]
mod tests;
