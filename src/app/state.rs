use crate::app::AppConfig;
use crate::cursor::{CursorError, CursorHost, CursorShape};
use crate::image::{composite, Image};
use winit::event::{ElementState, MouseButton};

/// Cursor and quad state driven by the left mouse button.
///
/// Pressing swaps in a cursor built from the pointer image stamped over the
/// texture; releasing restores the plain pointer image and drops the quad
/// where the pointer was.
pub struct CursorAppState<C> {
    idle: CursorShape,
    texture: Image,
    active: Option<C>,
    quad_visible: bool,
    quad_pos: [f32; 2],
    pointer: (f64, f64),
}

impl<C> CursorAppState<C> {
    pub fn new(cursor_image: Image, texture: Image) -> Self {
        CursorAppState {
            idle: CursorShape::anchored(cursor_image),
            texture,
            active: None,
            quad_visible: true,
            quad_pos: [0.0, 0.0],
            pointer: (0.0, 0.0),
        }
    }

    /// The quad's lower-left corner, if it should be drawn.
    pub fn quad(&self) -> Option<[f32; 2]> {
        self.quad_visible.then_some(self.quad_pos)
    }

    /// Pointer position in window logical pixels.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer = (x, y);
    }

    /// Show the plain pointer image, hotspot at its top-left.
    pub fn install_idle_cursor<H>(&mut self, host: &mut H) -> Result<(), CursorError>
    where
        H: CursorHost<Cursor = C>,
    {
        swap_cursor(&mut self.active, host, &self.idle)
    }

    pub fn mouse_input<H>(
        &mut self,
        host: &mut H,
        config: &AppConfig,
        button: MouseButton,
        state: ElementState,
    ) -> Result<(), CursorError>
    where
        H: CursorHost<Cursor = C>,
    {
        if button != MouseButton::Left {
            return Ok(());
        }

        match state {
            ElementState::Pressed => self.press(host, config),
            ElementState::Released => self.release(host, config),
        }
    }

    fn press<H>(&mut self, host: &mut H, config: &AppConfig) -> Result<(), CursorError>
    where
        H: CursorHost<Cursor = C>,
    {
        self.quad_visible = false;

        let image = composite(self.idle.image(), &self.texture, config.blend_mode)?;
        log::debug!(
            "Dragging with {}x{} composite cursor",
            image.width(),
            image.height()
        );
        swap_cursor(&mut self.active, host, &CursorShape::centered(image))
    }

    fn release<H>(&mut self, host: &mut H, config: &AppConfig) -> Result<(), CursorError>
    where
        H: CursorHost<Cursor = C>,
    {
        let (x, y) = self.pointer;
        self.quad_pos = config.pointer_to_ndc(x, y);
        self.quad_visible = true;
        log::debug!("Dropped quad at {:?} (pointer {x}, {y})", self.quad_pos);

        self.install_idle_cursor(host)
    }
}

fn swap_cursor<H: CursorHost>(
    active: &mut Option<H::Cursor>,
    host: &mut H,
    shape: &CursorShape,
) -> Result<(), CursorError> {
    let cursor = host.create_cursor(shape)?;
    host.install(&cursor);

    // previous cursor is released here
    *active = Some(cursor);
    Ok(())
}
