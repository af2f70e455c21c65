use crate::cursor::{CursorError, CursorShape};
use winit::event_loop::ActiveEventLoop;
use winit::window::{CustomCursor, Window};

/// Turns cursor shapes into platform cursors and shows them.
///
/// Dropping a `Cursor` releases it; the application keeps exactly one alive.
pub trait CursorHost {
    type Cursor;

    fn create_cursor(&mut self, shape: &CursorShape) -> Result<Self::Cursor, CursorError>;

    fn install(&mut self, cursor: &Self::Cursor);
}

pub struct WinitCursorHost<'a> {
    event_loop: &'a ActiveEventLoop,
    window: &'a Window,
}

impl<'a> WinitCursorHost<'a> {
    pub fn new(event_loop: &'a ActiveEventLoop, window: &'a Window) -> Self {
        WinitCursorHost { event_loop, window }
    }
}

impl CursorHost for WinitCursorHost<'_> {
    type Cursor = CustomCursor;

    fn create_cursor(&mut self, shape: &CursorShape) -> Result<CustomCursor, CursorError> {
        let image = shape.image();
        let too_large = || CursorError::TooLarge {
            width: image.width(),
            height: image.height(),
        };

        let width = u16::try_from(image.width()).map_err(|_| too_large())?;
        let height = u16::try_from(image.height()).map_err(|_| too_large())?;
        let (hx, hy) = shape.hotspot();
        let hotspot_x = u16::try_from(hx).map_err(|_| too_large())?;
        let hotspot_y = u16::try_from(hy).map_err(|_| too_large())?;

        let source =
            CustomCursor::from_rgba(image.data().to_vec(), width, height, hotspot_x, hotspot_y)?;
        Ok(self.event_loop.create_custom_cursor(source))
    }

    fn install(&mut self, cursor: &CustomCursor) {
        self.window.set_cursor(cursor.clone());
    }
}
