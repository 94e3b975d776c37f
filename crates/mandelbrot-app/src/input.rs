use mandelbrot_core::Key;
use winit::keyboard::KeyCode;

/// Map a physical key to its binding, if it has one.
pub fn key_for(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::Space => Some(Key::ZoomIn),
        KeyCode::ShiftLeft => Some(Key::ZoomReset),
        KeyCode::KeyU => Some(Key::ConstantXUp),
        KeyCode::KeyJ => Some(Key::ConstantXDown),
        KeyCode::KeyI => Some(Key::ConstantYUp),
        KeyCode::KeyK => Some(Key::ConstantYDown),
        KeyCode::KeyR => Some(Key::Reset),
        _ => None,
    }
}

/// Keys that close the window.
pub fn is_quit(code: KeyCode) -> bool {
    matches!(code, KeyCode::KeyQ | KeyCode::Escape)
}
