use crate::{
    foundation::error::SketchResult,
    paint::{
        color::{BLACK, Color, WHITE},
        state::TextAlign,
    },
    render::{surface::Surface, text::Font},
    sketch::{
        app::{Context, Sketch},
        random::Random,
    },
    sketches::FLOWER_PALETTE,
};

const GRASS: Color = Color::rgb(60, 140, 60);
const DEFAULT_RACERS: usize = 5;
const SEGMENTS: usize = 8;
const SEGMENT_RADIUS: f64 = 8.0;
const SEGMENT_SPACING: f64 = 10.0;
const START_X: f64 = 20.0;
const FINISH_MARGIN: f64 = 40.0;
const MAX_STEP: f64 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Caterpillar {
    /// x of the head.
    pub x: f64,
    pub color: Color,
    phase: f64,
}

/// Caterpillars creep forward by random steps; the first head across the line wins.
#[derive(Debug)]
pub struct CaterpillarRace {
    racers: Vec<Caterpillar>,
    count: usize,
    winner: Option<usize>,
    font: Option<Font>,
}

impl Default for CaterpillarRace {
    fn default() -> Self {
        Self::new(DEFAULT_RACERS)
    }
}

impl CaterpillarRace {
    pub fn new(count: usize) -> Self {
        Self {
            racers: Vec::new(),
            count: count.max(1),
            winner: None,
            font: None,
        }
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn racers(&self) -> &[Caterpillar] {
        &self.racers
    }

    /// Index of the winning caterpillar once the race is decided.
    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn finish_line(width: f64) -> f64 {
        width - FINISH_MARGIN
    }

    /// Line everyone up at the start.
    pub fn restart(&mut self, rng: &mut Random) {
        self.winner = None;
        self.racers = (0..self.count)
            .map(|i| Caterpillar {
                x: START_X + SEGMENT_SPACING * (SEGMENTS - 1) as f64,
                color: FLOWER_PALETTE[i % FLOWER_PALETTE.len()],
                phase: rng.range(0.0, std::f64::consts::TAU),
            })
            .collect();
    }

    /// Advance one frame. Once someone has won nobody moves.
    pub fn update(&mut self, width: f64, rng: &mut Random) {
        if self.winner.is_some() {
            return;
        }
        let finish = Self::finish_line(width);
        for (i, c) in self.racers.iter_mut().enumerate() {
            c.x += rng.range(0.0, MAX_STEP);
            c.phase += 0.3;
            if self.winner.is_none() && c.x >= finish {
                self.winner = Some(i);
            }
        }
        if let Some(i) = self.winner {
            tracing::debug!(winner = i, "caterpillar race decided");
        }
    }

    fn lane_y(&self, index: usize, height: f64) -> f64 {
        let lane = height / (self.racers.len() as f64 + 1.0);
        lane * (index as f64 + 1.0)
    }
}

impl<S: Surface> Sketch<S> for CaterpillarRace {
    fn setup(&mut self, ctx: &mut Context<'_, S>) -> SketchResult<()> {
        if let Some(font) = self.font.clone() {
            ctx.canvas.set_font(font);
        }
        self.restart(ctx.rng);
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context<'_, S>) -> SketchResult<()> {
        let (w, h) = (f64::from(ctx.canvas.width()), f64::from(ctx.canvas.height()));
        self.update(w, ctx.rng);

        let canvas = &mut *ctx.canvas;
        canvas.background(GRASS);
        canvas.stroke(WHITE);
        canvas.line_width(4.0);
        let finish = Self::finish_line(w);
        canvas.line(finish, 0.0, finish, h);

        canvas.no_stroke();
        for (i, c) in self.racers.iter().enumerate() {
            let y = self.lane_y(i, h);
            canvas.fill(c.color);
            for s in 0..SEGMENTS {
                let wiggle = (c.phase + s as f64).sin() * 3.0;
                let x = c.x - SEGMENT_SPACING * s as f64;
                canvas.circle(x, y + wiggle, SEGMENT_RADIUS);
            }
            canvas.fill(BLACK);
            canvas.circle(c.x + 3.0, y - 3.0, 2.0);
        }

        if let Some(i) = self.winner {
            canvas.fill(BLACK);
            canvas.text_align(TextAlign::Center);
            canvas.text(&format!("#{} wins!", i + 1), w / 2.0, 10.0, Some(28.0));
            canvas.text_align(TextAlign::Left);
        }
        Ok(())
    }

    fn pointer_clicked(&mut self, ctx: &mut Context<'_, S>) -> SketchResult<()> {
        self.restart(ctx.rng);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sketches/caterpillar.rs"]
mod tests;
