use winit::window::{CursorIcon, Window, WindowId};

use crate::coords::Viewport;
use crate::device::{Gpu, GpuFrame, SurfaceErrorAction};
use crate::input::InputState;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::app::AppControl;

/// The window an `App` callback runs for.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl WindowCtx<'_> {
    /// Current drawable area in logical pixels, with the DPI scale.
    pub fn viewport(&self) -> Viewport {
        let size = self.window.inner_size();
        Viewport::from_physical(size.width, size.height, self.window.scale_factor())
    }

    pub fn set_cursor(&self, cursor: CursorIcon) {
        self.window.set_cursor(cursor);
    }
}

/// Everything `App::on_frame` may touch while painting.
///
/// `'a` spans the callback, `'w` is the window borrow held by `Gpu<'w>`.
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputState,
}

impl FrameCtx<'_, '_> {
    /// Acquires a frame, fills it with `clear`, lets `draw` record on top and
    /// presents.
    ///
    /// With a transparent `clear` on a premultiplied surface, the desktop
    /// shows through wherever `draw` paints nothing. Surface loss is recovered
    /// by asking for another redraw; unrecoverable loss returns
    /// [`AppControl::Exit`].
    pub fn render<F>(&mut self, clear: Color, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => return self.recover(err),
        };

        clear_pass(&mut frame, clear);

        {
            let rctx = RenderCtx::new(
                self.gpu.device(),
                self.gpu.queue(),
                self.gpu.surface_format(),
                self.window.viewport(),
            );
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            draw(&rctx, &mut target);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);
        AppControl::Continue
    }

    fn recover(&mut self, err: wgpu::SurfaceError) -> AppControl {
        match self.gpu.handle_surface_error(err) {
            SurfaceErrorAction::Fatal => {
                log::error!("surface lost beyond recovery");
                AppControl::Exit
            }
            action => {
                log::debug!("frame skipped: {action:?}");
                AppControl::Redraw
            }
        }
    }
}

fn clear_pass(frame: &mut GpuFrame, clear: Color) {
    let [r, g, b, a] = clear.to_array().map(f64::from);

    // Dropping the pass ends it.
    frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("pendule clear"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: &frame.view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });
}
