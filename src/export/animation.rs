//! GIF animation of a history, one frame per step with a caption band
//! showing the iteration index

use super::{check_extension, ensure_parent};
use crate::error::{LifeError, LifeResult};
use crate::game_of_life::Grid;
use crate::simulation::History;
use log::{debug, info};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const DEAD: u8 = 0;
const ALIVE: u8 = 1;
const CAPTION_BACKGROUND: u8 = 2;
const CAPTION_TEXT: u8 = 3;

/// RGB triples indexed by the constants above
const PALETTE: [u8; 12] = [
    0xff, 0xff, 0xff, // dead
    0x00, 0x00, 0x00, // alive
    0xe6, 0xe6, 0xe6, // caption background
    0x28, 0x28, 0x28, // caption text
];

const GLYPH_WIDTH: usize = 3;
const GLYPH_HEIGHT: usize = 5;
const GLYPH_SPACING: usize = 1;
const CAPTION_PADDING: usize = 2;
const MAX_TEXT_SCALE: usize = 3;

pub const DEFAULT_CELL_SIZE: usize = 8;

/// How to render a history as an animation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationOptions {
    pub fps: u32,
    /// Number of steps to render, at most the history length
    pub frames: usize,
    /// Side of one cell in pixels
    pub cell_size: usize,
}

impl AnimationOptions {
    pub fn new(fps: u32, frames: usize) -> Self {
        Self {
            fps,
            frames,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }

    pub fn with_cell_size(mut self, cell_size: usize) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Frame delay in hundredths of a second
    fn delay(&self) -> u16 {
        (100 / self.fps).clamp(1, u16::MAX as u32) as u16
    }

    fn validate(&self, steps: usize) -> LifeResult<()> {
        if self.fps == 0 {
            return Err(LifeError::InvalidParameter {
                name: "fps",
                value: 0,
            });
        }
        if self.cell_size == 0 {
            return Err(LifeError::InvalidParameter {
                name: "cell_size",
                value: 0,
            });
        }
        if self.frames == 0 || self.frames > steps {
            return Err(LifeError::FrameCount {
                frames: self.frames,
                steps,
            });
        }
        Ok(())
    }
}

/// Write the first `options.frames` steps of the history as a looping GIF
pub fn save_history_gif<P: AsRef<Path>>(
    history: &History,
    path: P,
    options: &AnimationOptions,
) -> LifeResult<()> {
    let path = path.as_ref();
    check_extension(path, "gif")?;
    options.validate(history.len())?;

    let canvas = Canvas::for_history(history, options)?;
    ensure_parent(path)?;
    let writer = BufWriter::new(File::create(path)?);
    let mut encoder = gif::Encoder::new(writer, canvas.width_u16, canvas.height_u16, &PALETTE)?;
    encoder.set_repeat(gif::Repeat::Infinite)?;

    let delay = options.delay();
    for (i, grid) in history.iter().take(options.frames).enumerate() {
        let pixels = canvas.render(grid, i);
        let frame = gif::Frame {
            width: canvas.width_u16,
            height: canvas.height_u16,
            delay,
            buffer: Cow::Borrowed(&pixels),
            ..gif::Frame::default()
        };
        encoder.write_frame(&frame)?;
        debug!("wrote frame {}", i);
    }
    encoder.into_inner()?.flush()?;

    info!(
        "Simulation saved as {} ({} frames at {} fps)",
        path.display(),
        options.frames,
        options.fps
    );
    Ok(())
}

/// Frame geometry shared by every frame of one animation
struct Canvas {
    width: usize,
    height: usize,
    width_u16: u16,
    height_u16: u16,
    cell_size: usize,
    caption_height: usize,
    text_scale: usize,
    compact_caption: bool,
}

impl Canvas {
    fn for_history(history: &History, options: &AnimationOptions) -> LifeResult<Self> {
        let (rows, cols) = history.grid_shape();
        let width = cols * options.cell_size;

        let last = options.frames.saturating_sub(1);
        let fits = |len: usize, scale: usize| text_width(len, scale) + 2 * CAPTION_PADDING <= width;
        // Narrow grids get the bare number instead of the full label
        let compact_caption = !fits(caption(last, false).len(), 1);
        let label_len = caption(last, compact_caption).len();
        let text_scale = (1..=MAX_TEXT_SCALE)
            .rev()
            .find(|&scale| fits(label_len, scale))
            .unwrap_or(1);
        let caption_height = GLYPH_HEIGHT * text_scale + 2 * CAPTION_PADDING;
        let height = rows * options.cell_size + caption_height;

        let too_large = || LifeError::ImageTooLarge { width, height };
        Ok(Self {
            width,
            height,
            width_u16: u16::try_from(width).map_err(|_| too_large())?,
            height_u16: u16::try_from(height).map_err(|_| too_large())?,
            cell_size: options.cell_size,
            caption_height,
            text_scale,
            compact_caption,
        })
    }

    /// Palette indices for one frame, row-major
    fn render(&self, grid: &Grid, iteration: usize) -> Vec<u8> {
        let mut pixels = vec![DEAD; self.width * self.height];
        pixels[..self.width * self.caption_height].fill(CAPTION_BACKGROUND);
        self.draw_text(&mut pixels, &caption(iteration, self.compact_caption));

        for (row, col) in grid.living_cells() {
            let top = self.caption_height + row * self.cell_size;
            let left = col * self.cell_size;
            for y in top..top + self.cell_size {
                pixels[y * self.width + left..y * self.width + left + self.cell_size].fill(ALIVE);
            }
        }
        pixels
    }

    fn draw_text(&self, pixels: &mut [u8], text: &str) {
        let scale = self.text_scale;
        let advance = (GLYPH_WIDTH + GLYPH_SPACING) * scale;

        for (i, ch) in text.chars().enumerate() {
            let glyph = glyph(ch);
            let left = CAPTION_PADDING + i * advance;
            for (gy, bits) in glyph.iter().enumerate() {
                for gx in 0..GLYPH_WIDTH {
                    if bits & (0b100 >> gx) == 0 {
                        continue;
                    }
                    for dy in 0..scale {
                        for dx in 0..scale {
                            let x = left + gx * scale + dx;
                            let y = CAPTION_PADDING + gy * scale + dy;
                            // Numbers wider than a one-cell grid are clipped
                            if x < self.width {
                                pixels[y * self.width + x] = CAPTION_TEXT;
                            }
                        }
                    }
                }
            }
        }
    }
}

fn caption(iteration: usize, compact: bool) -> String {
    if compact {
        iteration.to_string()
    } else {
        format!("ITERATION: {}", iteration)
    }
}

fn text_width(chars: usize, scale: usize) -> usize {
    if chars == 0 {
        return 0;
    }
    (chars * (GLYPH_WIDTH + GLYPH_SPACING) - GLYPH_SPACING) * scale
}

/// 3x5 bitmap, one byte per row, most significant of the low three bits on the left
fn glyph(ch: char) -> [u8; GLYPH_HEIGHT] {
    match ch {
        '0' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        _ => [0; GLYPH_HEIGHT],
    }
}
