//! Mapping from terminal events to scene commands
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use cube3d_core::{CameraMove, Command, Slice};

/// Slices bound to the number keys `1` to `9`
const NUMBER_KEY_SLICES: [Slice; 9] = [
    Slice::FrontZ,
    Slice::MidZ,
    Slice::BackZ,
    Slice::TopY,
    Slice::MidY,
    Slice::BottomY,
    Slice::LeftX,
    Slice::MidX,
    Slice::RightX,
];

/// Command for a terminal event, if it has one
pub fn command_for_event(event: &Event) -> Option<Command> {
    match event {
        Event::Key(key) => command_for_key(key),
        Event::Mouse(mouse) => command_for_mouse(mouse),
        _ => None,
    }
}

fn command_for_key(key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let command = match key.code {
        KeyCode::Char(c @ '1'..='9') => {
            let index = c.to_digit(10)? as usize - 1;
            Command::Rotate(NUMBER_KEY_SLICES[index])
        }
        KeyCode::Char('`' | '~') => Command::ToggleDirection,
        KeyCode::Esc => Command::ResetCamera,
        KeyCode::Char('q') => Command::Quit,
        KeyCode::Char('w') => Command::MoveCamera(CameraMove::Forward),
        KeyCode::Char('s') => Command::MoveCamera(CameraMove::Backward),
        KeyCode::Char('a') => Command::MoveCamera(CameraMove::Left),
        KeyCode::Char('d') => Command::MoveCamera(CameraMove::Right),
        KeyCode::Char('r') => Command::MoveCamera(CameraMove::Up),
        KeyCode::Char('f') => Command::MoveCamera(CameraMove::Down),
        _ => return None,
    };
    Some(command)
}

fn command_for_mouse(mouse: &MouseEvent) -> Option<Command> {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(Command::Look {
            x: mouse.column as f32,
            y: mouse.row as f32,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers, MouseButton};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_number_keys_select_slices() {
        assert_eq!(
            command_for_event(&press(KeyCode::Char('1'))),
            Some(Command::Rotate(Slice::FrontZ))
        );
        assert_eq!(
            command_for_event(&press(KeyCode::Char('4'))),
            Some(Command::Rotate(Slice::TopY))
        );
        assert_eq!(
            command_for_event(&press(KeyCode::Char('9'))),
            Some(Command::Rotate(Slice::RightX))
        );
        assert_eq!(command_for_event(&press(KeyCode::Char('0'))), None);
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(
            command_for_event(&press(KeyCode::Char('`'))),
            Some(Command::ToggleDirection)
        );
        assert_eq!(command_for_event(&press(KeyCode::Esc)), Some(Command::ResetCamera));
        assert_eq!(command_for_event(&press(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(
            command_for_event(&press(KeyCode::Char('r'))),
            Some(Command::MoveCamera(CameraMove::Up))
        );
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('1'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(command_for_event(&release), None);
    }

    #[test]
    fn test_mouse_motion_looks() {
        let moved = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: 12,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            command_for_event(&moved),
            Some(Command::Look { x: 12.0, y: 7.0 })
        );

        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(command_for_event(&click), None);
    }
}
