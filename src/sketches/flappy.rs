use crate::{
    foundation::error::SketchResult,
    paint::{
        color::{BLACK, Color, GREEN, ORANGE, WHITE, YELLOW},
        state::TextAlign,
    },
    render::{surface::Surface, text::Font},
    sketch::{
        app::{Context, Sketch},
        random::Random,
    },
};

const SKY: Color = Color::rgb(112, 197, 206);
const GROUND_HEIGHT: f64 = 20.0;
const BIRD_RADIUS: f64 = 12.0;
const GRAVITY: f64 = 0.5;
const FLAP_VELOCITY: f64 = -8.0;
const PIPE_WIDTH: f64 = 60.0;
const PIPE_GAP: f64 = 140.0;
const PIPE_SPEED: f64 = 3.0;
const PIPE_SPACING: f64 = 220.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pipe {
    pub x: f64,
    /// Vertical center of the opening.
    pub gap_y: f64,
    scored: bool,
}

/// One-button arcade game: click to start and flap, avoid the pipes and the ground.
#[derive(Debug, Default)]
pub struct Flappy {
    bird_y: f64,
    velocity: f64,
    pipes: Vec<Pipe>,
    started: bool,
    game_over: bool,
    score: u32,
    font: Option<Font>,
}

impl Flappy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn bird_y(&self) -> f64 {
        self.bird_y
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    fn bird_x(width: f64) -> f64 {
        width / 4.0
    }

    fn reset(&mut self, height: f64) {
        self.bird_y = height / 2.0;
        self.velocity = 0.0;
        self.pipes.clear();
        self.started = false;
        self.game_over = false;
        self.score = 0;
    }

    /// Click handling: restart after a crash, otherwise start and flap.
    pub fn flap(&mut self, height: f64) {
        if self.game_over {
            self.reset(height);
            return;
        }
        self.started = true;
        self.velocity = FLAP_VELOCITY;
    }

    /// Advance the simulation by one frame.
    pub fn update(&mut self, width: f64, height: f64, rng: &mut Random) {
        if !self.started || self.game_over {
            return;
        }

        self.velocity += GRAVITY;
        self.bird_y += self.velocity;

        for pipe in &mut self.pipes {
            pipe.x -= PIPE_SPEED;
        }
        self.pipes.retain(|p| p.x + PIPE_WIDTH > 0.0);

        let needs_pipe = self
            .pipes
            .last()
            .is_none_or(|p| p.x < width - PIPE_SPACING);
        if needs_pipe {
            let margin = PIPE_GAP / 2.0 + 20.0;
            let gap_y = rng.range(margin, height - GROUND_HEIGHT - margin);
            self.pipes.push(Pipe {
                x: width,
                gap_y,
                scored: false,
            });
        }

        let bird_x = Self::bird_x(width);
        for pipe in &mut self.pipes {
            if !pipe.scored && pipe.x + PIPE_WIDTH < bird_x - BIRD_RADIUS {
                pipe.scored = true;
                self.score += 1;
            }
        }

        if self.collides(bird_x, height) {
            tracing::debug!(score = self.score, "flappy crashed");
            self.game_over = true;
        }
    }

    fn collides(&self, bird_x: f64, height: f64) -> bool {
        if self.bird_y + BIRD_RADIUS >= height - GROUND_HEIGHT || self.bird_y - BIRD_RADIUS < 0.0 {
            return true;
        }
        self.pipes.iter().any(|p| {
            let overlaps_x = bird_x + BIRD_RADIUS > p.x && bird_x - BIRD_RADIUS < p.x + PIPE_WIDTH;
            let in_gap = self.bird_y - BIRD_RADIUS > p.gap_y - PIPE_GAP / 2.0
                && self.bird_y + BIRD_RADIUS < p.gap_y + PIPE_GAP / 2.0;
            overlaps_x && !in_gap
        })
    }
}

impl<S: Surface> Sketch<S> for Flappy {
    fn setup(&mut self, ctx: &mut Context<'_, S>) -> SketchResult<()> {
        if let Some(font) = self.font.clone() {
            ctx.canvas.set_font(font);
        }
        self.reset(f64::from(ctx.canvas.height()));
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context<'_, S>) -> SketchResult<()> {
        let (w, h) = (f64::from(ctx.canvas.width()), f64::from(ctx.canvas.height()));
        self.update(w, h, ctx.rng);

        let canvas = &mut *ctx.canvas;
        canvas.background(SKY);
        canvas.no_stroke();

        canvas.fill(GREEN);
        for p in &self.pipes {
            let top = p.gap_y - PIPE_GAP / 2.0;
            let bottom = p.gap_y + PIPE_GAP / 2.0;
            canvas.rect(p.x, 0.0, PIPE_WIDTH, top);
            canvas.rect(p.x, bottom, PIPE_WIDTH, h - GROUND_HEIGHT - bottom);
        }

        canvas.fill(ORANGE);
        canvas.rect(0.0, h - GROUND_HEIGHT, w, GROUND_HEIGHT);

        canvas.fill(YELLOW);
        canvas.circle(Self::bird_x(w), self.bird_y, BIRD_RADIUS);

        canvas.fill(WHITE);
        canvas.text_align(TextAlign::Center);
        canvas.text(&self.score.to_string(), w / 2.0, 10.0, Some(32.0));
        if self.game_over {
            canvas.fill(BLACK);
            canvas.text("GAME OVER", w / 2.0, h / 2.0 - 20.0, Some(40.0));
        } else if !self.started {
            canvas.text("click to flap", w / 2.0, h / 2.0 + 30.0, Some(20.0));
        }
        canvas.text_align(TextAlign::Left);
        Ok(())
    }

    fn pointer_clicked(&mut self, ctx: &mut Context<'_, S>) -> SketchResult<()> {
        self.flap(f64::from(ctx.canvas.height()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sketches/flappy.rs"]
mod tests;
