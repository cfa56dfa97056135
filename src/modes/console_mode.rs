use crossterm::{
    cursor::{self, Hide, Show},
    event::{poll, read, Event, KeyCode, KeyEventKind},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen, SetTitle,
    },
};

use fps_clock::FpsClock;

use std::{
    io::{stdout, Stdout, Write},
    time::Duration,
};

use crate::{
    data::{error::RunError, Command, Program},
    game::geometry::Direction,
    graphics::{Argb, Pixel, PixelBuffer},
};

/// Channel difference under which neighbouring cells share one colour run.
const ERROR: u8 = 6;

/// Characters sharing a foreground and background colour.
struct ColoredString {
    pub string: String,
    pub fg: Argb,
    pub bg: Argb,
}

fn close(c1: Argb, c2: Argb) -> bool {
    let [_, r, g, b] = c1.decompose();
    let [_, nr, ng, nb] = c2.decompose();

    r.abs_diff(nr) <= ERROR && g.abs_diff(ng) <= ERROR && b.abs_diff(nb) <= ERROR
}

fn rgb(c: Argb) -> Color {
    let [_, r, g, b] = c.decompose();
    Color::Rgb { r, g, b }
}

/// Compresses similar cells of one line into runs.
#[derive(Default)]
struct StyledLine {
    runs: Vec<ColoredString>,
}

impl StyledLine {
    fn push(&mut self, ch: char, fg: Argb, bg: Argb) {
        if let Some(last) = self.runs.last_mut() {
            if close(last.fg, fg) && close(last.bg, bg) {
                last.string.push(ch);
                return;
            }
        }

        self.runs.push(ColoredString {
            string: ch.to_string(),
            fg,
            bg,
        });
    }

    fn queue_print(&mut self, stdout: &mut Stdout) -> std::io::Result<()> {
        for ColoredString { string, fg, bg } in self.runs.drain(..) {
            queue!(
                stdout,
                SetForegroundColor(rgb(fg)),
                SetBackgroundColor(rgb(bg)),
                Print(string)
            )?;
        }

        queue!(stdout, ResetColor)
    }
}

/// Builds the runs for terminal row `row`: upper half block with the top
/// pixel as foreground and the pixel below it as background.
fn block_line(pix: &PixelBuffer, row: usize) -> StyledLine {
    let mut line = StyledLine::default();
    let w = pix.width();
    let y = row * 2;

    for x in 0..w {
        let top = pix.composited(y * w + x);
        let bottom = if y + 1 < pix.height() {
            pix.composited((y + 1) * w + x)
        } else {
            Argb::black()
        };

        line.push('▀', top, bottom);
    }

    line
}

fn print_block(prog: &Program, stdout: &mut Stdout) -> std::io::Result<()> {
    let rows = prog.pix.height().div_ceil(2);

    for row in 0..rows {
        queue!(stdout, cursor::MoveTo(0, row as u16))?;
        block_line(&prog.pix, row).queue_print(stdout)?;
    }

    queue!(
        stdout,
        cursor::MoveTo(0, rows as u16),
        Clear(ClearType::UntilNewLine),
        Print(prog.title())
    )
}

fn key_command(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Esc => Some(Command::Close),

        KeyCode::Up => Some(Command::Steer(Direction::Up)),
        KeyCode::Down => Some(Command::Steer(Direction::Down)),
        KeyCode::Left => Some(Command::Steer(Direction::Left)),
        KeyCode::Right => Some(Command::Steer(Direction::Right)),

        KeyCode::Char(c) => Command::from_char(c),

        _ => None,
    }
}

/// Handles pending events. Returns true when the program should exit.
pub fn control_key_events_con(prog: &mut Program, stdout: &mut Stdout) -> Result<bool, RunError> {
    while poll(Duration::ZERO)? {
        match read()? {
            Event::Key(event) if event.kind != KeyEventKind::Release => {
                let Some(cmd) = key_command(event.code) else {
                    continue;
                };

                if prog.eval_command(cmd) {
                    return Ok(true);
                }
            }

            Event::Resize(..) => queue!(stdout, Clear(ClearType::All))?,

            _ => {}
        }
    }

    Ok(false)
}

fn run(prog: &mut Program, stdout: &mut Stdout) -> Result<(), RunError> {
    let mut clock = FpsClock::new(prog.fps());
    prog.restart_clock();

    loop {
        if control_key_events_con(prog, stdout)? {
            return Ok(());
        }

        prog.render();

        if let Some(title) = prog.title_changed() {
            queue!(stdout, SetTitle(title))?;
        }

        print_block(prog, stdout)?;
        stdout.flush()?;

        clock.tick();
    }
}

pub fn con_main(mut prog: Program) -> Result<(), RunError> {
    prog.print_startup_info();

    let mut stdout = stdout();

    enable_raw_mode()?;
    queue!(
        stdout,
        EnterAlternateScreen,
        Hide,
        Clear(ClearType::All),
        SetTitle(prog.title())
    )?;

    let result = run(&mut prog, &mut stdout);

    // Restore the terminal even when the loop failed.
    queue!(stdout, ResetColor, LeaveAlternateScreen, Show)?;
    stdout.flush()?;
    disable_raw_mode()?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn similar_cells_share_a_run() {
        let mut line = StyledLine::default();
        line.push('▀', 0xFF_10_10_10, 0xFF_00_00_00);
        line.push('▀', 0xFF_12_10_10, 0xFF_00_00_01);
        line.push('▀', 0xFF_80_10_10, 0xFF_00_00_00);

        assert_eq!(line.runs.len(), 2);
        assert_eq!(line.runs[0].string, "▀▀");
        assert_eq!(line.runs[1].fg, 0xFF_80_10_10);
    }

    #[test]
    fn rows_pair_up_pixels() {
        let mut pix = PixelBuffer::new(2, 3);
        pix.fill(Argb::white());

        let top = block_line(&pix, 0);
        assert_eq!(top.runs.len(), 1);
        assert_eq!(top.runs[0].bg, Argb::white());

        // The last row has no pixel below it.
        let last = block_line(&pix, 1);
        assert_eq!(last.runs[0].fg, Argb::white());
        assert_eq!(last.runs[0].bg, Argb::black());
    }

    #[test]
    fn keys_translate() {
        assert_eq!(key_command(KeyCode::Up), Some(Command::Steer(Direction::Up)));
        assert_eq!(key_command(KeyCode::Char('a')), Some(Command::Steer(Direction::Left)));
        assert_eq!(key_command(KeyCode::Esc), Some(Command::Close));
        assert_eq!(key_command(KeyCode::Enter), None);
    }
}
