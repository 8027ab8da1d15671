use crossterm::{
    cursor,
    event::{self, KeyCode, KeyEvent, KeyModifiers},
    execute, queue, terminal,
};
use lifelike::{Snapshot, SnapshotSink};
use std::io::{self, Write};

pub enum ConsoleCommand {
    Exit,
    Handled,
}

/// Draws every snapshot to the terminal
///
/// The view wraps around the toroidal grid; arrow keys scroll it.
pub struct ConsoleRender {
    top: isize,
    left: isize,
    report: String,
}
impl ConsoleRender {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), cursor::Hide)?;
        Ok(Self {
            top: 0,
            left: 0,
            report: String::new(),
        })
    }

    pub fn render(&self, snapshot: Snapshot<'_>) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        // the last terminal row holds the footer
        let view_rows = rows.saturating_sub(1);
        let window = snapshot
            .grid
            .window(self.top, self.left, view_rows as usize, cols as usize);

        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        let mut buf = [0; 4];
        for (r, c, state) in window.iter() {
            queue!(stdout, cursor::MoveTo(c as u16, r as u16))?;
            stdout.write_all(state.glyph().encode_utf8(&mut buf).as_bytes())?;
        }

        // write footer
        queue!(stdout, cursor::MoveTo(0, view_rows))?;
        write!(
            stdout,
            "gen:{} pop:{} {}",
            snapshot.generation, snapshot.population, self.report
        )?;

        stdout.flush()
    }

    pub fn poll_events(&mut self) -> io::Result<Option<ConsoleCommand>> {
        // make sure event is preset for us to take
        if !event::poll(std::time::Duration::from_secs(0))? {
            return Ok(None);
        }

        let mut outp = Ok(Some(ConsoleCommand::Handled));
        match event::read()? {
            // CTRL+C
            event::Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }) => {
                outp = Ok(Some(ConsoleCommand::Exit));
            }
            // arrows to move grid
            event::Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Up => self.top -= 1,
                KeyCode::Down => self.top += 1,
                KeyCode::Left => self.left -= 1,
                KeyCode::Right => self.left += 1,
                _ => {}
            },
            _ => {}
        }
        outp
    }

    pub fn set_report(&mut self, report: String) {
        self.report = report;
    }
}
impl SnapshotSink for ConsoleRender {
    fn emit(&mut self, snapshot: Snapshot<'_>) -> io::Result<()> {
        self.render(snapshot)
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        // nothing left to report to if the terminal refuses
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), cursor::Show);
    }
}
