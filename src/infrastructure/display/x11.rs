//! X11 backend using x11rb
//!
//! One connection serves both halves: [`X11Screen`] queries the pointer and
//! reads root window pixels, [`X11Tooltip`] owns an override-redirect window
//! plus the pointer and keyboard grabs.

use std::fmt;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use tiny_skia::Pixmap;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    AtomEnum, ConfigureWindowAux, ConnectionExt as _, CreateGCAux, CreateWindowAux, Cursor,
    EventMask, Gcontext, GrabMode, GrabStatus, ImageFormat, ImageOrder, Keycode, Keysym,
    PropMode, Screen, Setup, StackMode, VisualClass, Window, WindowClass,
};
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;
use x11rb::{COPY_DEPTH_FROM_PARENT, COPY_FROM_PARENT, CURRENT_TIME, NONE};

use crate::application::ports::{InputEvent, Overlay, OverlayError, SampleError, ScreenSampler};
use crate::domain::color::SampledColor;
use crate::domain::picker::{Point, Size, TooltipLabel};
use crate::gui::TooltipRenderer;

use super::DisplayError;

/// Glyph index of the crosshair in the X cursor font (mask is the next glyph)
const XC_CROSSHAIR: u16 = 34;

const BUTTON_LEFT: u8 = 1;
const BUTTON_RIGHT: u8 = 3;

const XK_ESCAPE: Keysym = 0xff1b;
const XK_RETURN: Keysym = 0xff0d;
const XK_KP_ENTER: Keysym = 0xff8d;

/// Another client (a window manager key binding, usually) may hold a grab for
/// a moment after launching us.
const GRAB_ATTEMPTS: u32 = 20;
const GRAB_RETRY_DELAY: Duration = Duration::from_millis(25);

/// Open the display named by `DISPLAY`
pub(super) fn connect(
    renderer: TooltipRenderer,
) -> Result<(X11Screen, X11Tooltip), DisplayError> {
    let name = super::display_name()?;
    let (conn, screen_num) = x11rb::connect(Some(&name))
        .map_err(|e| DisplayError::Unavailable(format!("cannot open display {}: {}", name, e)))?;
    let conn = Rc::new(conn);

    let screen = conn
        .setup()
        .roots
        .get(screen_num)
        .cloned()
        .ok_or_else(|| DisplayError::Unsupported(format!("screen {} not found", screen_num)))?;

    let layout = PixelLayout::for_screen(conn.setup(), &screen)?;
    if layout.bytes_per_pixel != 4 {
        return Err(DisplayError::Unsupported(format!(
            "{} bits per pixel (only 32 bpp visuals are supported)",
            layout.bytes_per_pixel * 8
        )));
    }

    let sampler = X11Screen {
        conn: Rc::clone(&conn),
        root: screen.root,
        size: Size::new(
            u32::from(screen.width_in_pixels),
            u32::from(screen.height_in_pixels),
        ),
        layout,
    };
    let tooltip = X11Tooltip::create(conn, &screen, layout, renderer)?;

    Ok((sampler, tooltip))
}

fn protocol(e: impl fmt::Display) -> DisplayError {
    DisplayError::Protocol(e.to_string())
}

fn lost(e: impl fmt::Display) -> OverlayError {
    OverlayError::ConnectionLost(e.to_string())
}

/// How a pixel value is laid out in a ZPixmap image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PixelLayout {
    bytes_per_pixel: usize,
    red_mask: u32,
    green_mask: u32,
    blue_mask: u32,
    lsb_first: bool,
}

impl PixelLayout {
    fn for_screen(setup: &Setup, screen: &Screen) -> Result<Self, DisplayError> {
        let visual = screen
            .allowed_depths
            .iter()
            .flat_map(|depth| depth.visuals.iter())
            .find(|visual| visual.visual_id == screen.root_visual)
            .ok_or_else(|| DisplayError::Unsupported("root visual not found".to_string()))?;

        if visual.class != VisualClass::TRUE_COLOR && visual.class != VisualClass::DIRECT_COLOR {
            return Err(DisplayError::Unsupported(format!(
                "{:?} visuals are not supported",
                visual.class
            )));
        }

        let format = setup
            .pixmap_formats
            .iter()
            .find(|format| format.depth == screen.root_depth)
            .ok_or_else(|| {
                DisplayError::Unsupported(format!("no pixmap format for depth {}", screen.root_depth))
            })?;

        let bytes_per_pixel = usize::from(format.bits_per_pixel / 8);
        if !(1..=4).contains(&bytes_per_pixel) {
            return Err(DisplayError::Unsupported(format!(
                "{} bits per pixel",
                format.bits_per_pixel
            )));
        }

        Ok(Self {
            bytes_per_pixel,
            red_mask: visual.red_mask,
            green_mask: visual.green_mask,
            blue_mask: visual.blue_mask,
            lsb_first: setup.image_byte_order == ImageOrder::LSB_FIRST,
        })
    }
}

/// Decode the first pixel of a ZPixmap image
fn decode_pixel(data: &[u8], layout: &PixelLayout) -> Option<SampledColor> {
    let bytes = data.get(..layout.bytes_per_pixel)?;
    let value = if layout.lsb_first {
        bytes.iter().rev().fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
    } else {
        bytes.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
    };

    Some(SampledColor::new(
        unpack_channel(value, layout.red_mask),
        unpack_channel(value, layout.green_mask),
        unpack_channel(value, layout.blue_mask),
    ))
}

/// Append one pixel in the server's format
fn encode_pixel(color: SampledColor, layout: &PixelLayout, out: &mut Vec<u8>) {
    let value = pack_channel(color.red, layout.red_mask)
        | pack_channel(color.green, layout.green_mask)
        | pack_channel(color.blue, layout.blue_mask);

    for i in 0..layout.bytes_per_pixel {
        let byte = if layout.lsb_first {
            i
        } else {
            layout.bytes_per_pixel - 1 - i
        };
        out.push((value >> (8 * byte)) as u8);
    }
}

fn encode_pixmap(pixmap: &Pixmap, layout: &PixelLayout) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixmap.pixels().len() * layout.bytes_per_pixel);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        encode_pixel(
            SampledColor::new(c.red(), c.green(), c.blue()),
            layout,
            &mut out,
        );
    }
    out
}

/// Scale the masked channel to 0..=255
fn unpack_channel(value: u32, mask: u32) -> u8 {
    if mask == 0 {
        return 0;
    }
    let shift = mask.trailing_zeros();
    let max = u64::from(mask >> shift);
    let raw = u64::from((value & mask) >> shift);
    ((raw * 255 + max / 2) / max) as u8
}

fn pack_channel(channel: u8, mask: u32) -> u32 {
    if mask == 0 {
        return 0;
    }
    let shift = mask.trailing_zeros();
    let max = u64::from(mask >> shift);
    let raw = (u64::from(channel) * max + 127) / 255;
    (raw as u32) << shift
}

/// Keycodes bound to commit and cancel
#[derive(Debug, Default, PartialEq, Eq)]
struct KeyBindings {
    commit: Vec<Keycode>,
    cancel: Vec<Keycode>,
}

impl KeyBindings {
    fn load(conn: &RustConnection) -> Result<Self, DisplayError> {
        let setup = conn.setup();
        let min = setup.min_keycode;
        let count = setup.max_keycode - min + 1;
        let reply = conn
            .get_keyboard_mapping(min, count)
            .map_err(protocol)?
            .reply()
            .map_err(protocol)?;

        Ok(Self::from_mapping(
            min,
            reply.keysyms_per_keycode,
            &reply.keysyms,
        ))
    }

    fn from_mapping(min_keycode: Keycode, per_keycode: u8, keysyms: &[Keysym]) -> Self {
        let mut keys = Self::default();
        if per_keycode == 0 {
            return keys;
        }

        for (i, syms) in keysyms.chunks(usize::from(per_keycode)).enumerate() {
            let Ok(offset) = u8::try_from(i) else {
                break;
            };
            let keycode = min_keycode.saturating_add(offset);

            if syms.contains(&XK_ESCAPE) {
                keys.cancel.push(keycode);
            }
            if syms.iter().any(|s| *s == XK_RETURN || *s == XK_KP_ENTER) {
                keys.commit.push(keycode);
            }
        }

        keys
    }

    fn event_for(&self, keycode: Keycode) -> Option<InputEvent> {
        if self.cancel.contains(&keycode) {
            Some(InputEvent::Cancel)
        } else if self.commit.contains(&keycode) {
            Some(InputEvent::Commit)
        } else {
            None
        }
    }
}

/// Reads the pointer position and root window pixels
pub struct X11Screen {
    conn: Rc<RustConnection>,
    root: Window,
    size: Size,
    layout: PixelLayout,
}

impl ScreenSampler for X11Screen {
    fn cursor_position(&mut self) -> Result<Point, SampleError> {
        let reply = self
            .conn
            .query_pointer(self.root)
            .map_err(|e| SampleError::CursorUnavailable(e.to_string()))?
            .reply()
            .map_err(|e| SampleError::CursorUnavailable(e.to_string()))?;

        if !reply.same_screen {
            return Err(SampleError::CursorUnavailable(
                "pointer is on another screen".to_string(),
            ));
        }

        Ok(Point::new(reply.root_x.into(), reply.root_y.into()))
    }

    fn sample(&mut self, at: Point) -> Result<SampledColor, SampleError> {
        let unavailable = |reason: String| SampleError::PixelUnavailable {
            x: at.x,
            y: at.y,
            reason,
        };

        let x = i16::try_from(at.x).map_err(|_| unavailable("outside the screen".to_string()))?;
        let y = i16::try_from(at.y).map_err(|_| unavailable("outside the screen".to_string()))?;

        let reply = self
            .conn
            .get_image(ImageFormat::Z_PIXMAP, self.root, x, y, 1, 1, !0)
            .map_err(|e| unavailable(e.to_string()))?
            .reply()
            .map_err(|e| unavailable(e.to_string()))?;

        decode_pixel(&reply.data, &self.layout)
            .ok_or_else(|| unavailable(format!("short image reply ({} bytes)", reply.data.len())))
    }

    fn screen_size(&self) -> Size {
        self.size
    }
}

/// Last rendered tooltip, kept for Expose redraws
struct Frame {
    width: u16,
    height: u16,
    data: Vec<u8>,
}

/// Borderless topmost tooltip window holding the input grabs
pub struct X11Tooltip {
    conn: Rc<RustConnection>,
    root: Window,
    window: Window,
    gc: Gcontext,
    cursor: Cursor,
    depth: u8,
    layout: PixelLayout,
    renderer: TooltipRenderer,
    keys: KeyBindings,
    frame: Option<Frame>,
    mapped: bool,
    closed: bool,
}

impl X11Tooltip {
    fn create(
        conn: Rc<RustConnection>,
        screen: &Screen,
        layout: PixelLayout,
        renderer: TooltipRenderer,
    ) -> Result<Self, DisplayError> {
        let window = conn.generate_id().map_err(protocol)?;
        conn.create_window(
            COPY_DEPTH_FROM_PARENT,
            window,
            screen.root,
            0,
            0,
            1,
            1,
            0,
            WindowClass::INPUT_OUTPUT,
            COPY_FROM_PARENT,
            &CreateWindowAux::new()
                .override_redirect(1)
                .background_pixel(screen.black_pixel)
                .event_mask(EventMask::EXPOSURE),
        )
        .map_err(protocol)?;
        mark_as_tooltip(&conn, window)?;

        let gc = conn.generate_id().map_err(protocol)?;
        conn.create_gc(gc, window, &CreateGCAux::new())
            .map_err(protocol)?;

        let cursor = crosshair_cursor(&conn)?;
        let keys = KeyBindings::load(&conn)?;

        // Built before grabbing so Drop releases everything if a grab fails
        let tooltip = Self {
            conn,
            root: screen.root,
            window,
            gc,
            cursor,
            depth: screen.root_depth,
            layout,
            renderer,
            keys,
            frame: None,
            mapped: false,
            closed: false,
        };
        tooltip.grab_input()?;

        Ok(tooltip)
    }

    fn grab_input(&self) -> Result<(), DisplayError> {
        grab_with_retry("pointer", || {
            let reply = self
                .conn
                .grab_pointer(
                    false,
                    self.root,
                    EventMask::BUTTON_PRESS,
                    GrabMode::ASYNC,
                    GrabMode::ASYNC,
                    NONE,
                    self.cursor,
                    CURRENT_TIME,
                )
                .map_err(protocol)?
                .reply()
                .map_err(protocol)?;
            Ok(reply.status)
        })?;

        grab_with_retry("keyboard", || {
            let reply = self
                .conn
                .grab_keyboard(
                    false,
                    self.root,
                    CURRENT_TIME,
                    GrabMode::ASYNC,
                    GrabMode::ASYNC,
                )
                .map_err(protocol)?
                .reply()
                .map_err(protocol)?;
            Ok(reply.status)
        })
    }

    fn draw_frame(&self) -> Result<(), OverlayError> {
        if let Some(frame) = &self.frame {
            self.conn
                .put_image(
                    ImageFormat::Z_PIXMAP,
                    self.window,
                    self.gc,
                    frame.width,
                    frame.height,
                    0,
                    0,
                    0,
                    self.depth,
                    &frame.data,
                )
                .map_err(lost)?;
        }
        Ok(())
    }
}

impl Overlay for X11Tooltip {
    fn measure(&self, label: &TooltipLabel) -> Size {
        self.renderer.measure(label)
    }

    fn show(&mut self, label: &TooltipLabel, origin: Point) -> Result<(), OverlayError> {
        let pixmap = self
            .renderer
            .render(label)
            .map_err(|e| OverlayError::DrawFailed(e.to_string()))?;
        let too_large = || OverlayError::DrawFailed("tooltip larger than the screen".to_string());
        let width = u16::try_from(pixmap.width()).map_err(|_| too_large())?;
        let height = u16::try_from(pixmap.height()).map_err(|_| too_large())?;

        self.conn
            .configure_window(
                self.window,
                &ConfigureWindowAux::new()
                    .x(origin.x)
                    .y(origin.y)
                    .width(u32::from(width))
                    .height(u32::from(height))
                    .stack_mode(StackMode::ABOVE),
            )
            .map_err(lost)?;

        if !self.mapped {
            self.conn.map_window(self.window).map_err(lost)?;
            self.mapped = true;
        }

        self.frame = Some(Frame {
            width,
            height,
            data: encode_pixmap(&pixmap, &self.layout),
        });
        self.draw_frame()?;
        self.conn.flush().map_err(lost)?;

        Ok(())
    }

    fn poll_input(&mut self) -> Result<Vec<InputEvent>, OverlayError> {
        let mut events = Vec::new();
        let mut redraw = false;

        while let Some(event) = self.conn.poll_for_event().map_err(lost)? {
            match event {
                Event::ButtonPress(press) => match press.detail {
                    BUTTON_LEFT => events.push(InputEvent::Commit),
                    BUTTON_RIGHT => events.push(InputEvent::Cancel),
                    _ => {}
                },
                Event::KeyPress(press) => {
                    if let Some(event) = self.keys.event_for(press.detail) {
                        events.push(event);
                    }
                }
                Event::Expose(expose) if expose.count == 0 => redraw = true,
                Event::Error(err) => {
                    return Err(OverlayError::DrawFailed(format!("{:?}", err)));
                }
                _ => {}
            }
        }

        if redraw {
            self.draw_frame()?;
            self.conn.flush().map_err(lost)?;
        }

        Ok(events)
    }

    fn close(&mut self) -> Result<(), OverlayError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        self.conn.ungrab_pointer(CURRENT_TIME).map_err(lost)?;
        self.conn.ungrab_keyboard(CURRENT_TIME).map_err(lost)?;
        self.conn.destroy_window(self.window).map_err(lost)?;
        self.conn.free_gc(self.gc).map_err(lost)?;
        self.conn.free_cursor(self.cursor).map_err(lost)?;
        self.conn.flush().map_err(lost)?;

        Ok(())
    }
}

impl Drop for X11Tooltip {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

fn mark_as_tooltip(conn: &RustConnection, window: Window) -> Result<(), DisplayError> {
    let intern = |name: &[u8]| -> Result<u32, DisplayError> {
        Ok(conn
            .intern_atom(false, name)
            .map_err(protocol)?
            .reply()
            .map_err(protocol)?
            .atom)
    };

    let window_type = intern(b"_NET_WM_WINDOW_TYPE")?;
    let tooltip = intern(b"_NET_WM_WINDOW_TYPE_TOOLTIP")?;
    conn.change_property32(
        PropMode::REPLACE,
        window,
        window_type,
        AtomEnum::ATOM,
        &[tooltip],
    )
    .map_err(protocol)?;

    Ok(())
}

fn crosshair_cursor(conn: &RustConnection) -> Result<Cursor, DisplayError> {
    let font = conn.generate_id().map_err(protocol)?;
    conn.open_font(font, b"cursor").map_err(protocol)?;

    let cursor = conn.generate_id().map_err(protocol)?;
    conn.create_glyph_cursor(
        cursor,
        font,
        font,
        XC_CROSSHAIR,
        XC_CROSSHAIR + 1,
        0,
        0,
        0,
        0xffff,
        0xffff,
        0xffff,
    )
    .map_err(protocol)?;
    conn.close_font(font).map_err(protocol)?;

    Ok(cursor)
}

fn grab_with_retry(
    what: &'static str,
    mut attempt: impl FnMut() -> Result<GrabStatus, DisplayError>,
) -> Result<(), DisplayError> {
    for _ in 0..GRAB_ATTEMPTS {
        if attempt()? == GrabStatus::SUCCESS {
            return Ok(());
        }
        thread::sleep(GRAB_RETRY_DELAY);
    }
    Err(DisplayError::GrabFailed(what))
}
