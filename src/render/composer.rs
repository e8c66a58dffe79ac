//! Composes one image plus its settings into the destination frame.

use crate::assets::decode::PreparedImage;
use crate::assets::logo::LogoAsset;
use crate::foundation::core::FrameSize;
use crate::geometry;
use crate::render::composite;
use crate::render::surface::FrameSurface;
use crate::settings::ImageSettings;

/// Logo height as a fraction of the output frame height.
pub const LOGO_HEIGHT_FRACTION: f64 = 0.05;
/// Margin around the logo as a fraction of the logo height.
pub const LOGO_MARGIN_FRACTION: f64 = 1.0;

/// Composite `image` into `dest` under `settings`.
///
/// The draw order is fixed: frame sizing, base image, vignette, logo. The
/// vignette never occludes the logo, and nothing draws before the frame is
/// sized. A `Pending`/`Failed`/zero-sized logo skips its own step only.
pub fn render_frame(
    dest: &mut FrameSurface,
    image: &PreparedImage,
    settings: &ImageSettings,
    logo: &LogoAsset,
    target: FrameSize,
) {
    let (frame_w, frame_h) = if settings.keep_original {
        (image.width, image.height)
    } else {
        (target.width, target.height)
    };
    dest.reset(frame_w, frame_h);

    composite::draw_image_scaled(
        dest,
        image,
        -settings.fit.offset_x,
        -settings.fit.offset_y,
        settings.fit.draw_w,
        settings.fit.draw_h,
    );

    if settings.add_gradient {
        composite::fill_corner_gradient(dest, settings.logo_corner);
    }

    if let Some(logo_img) = logo.image() {
        let (logo_w, logo_h) = geometry::compute_logo_size(
            logo_img.width,
            logo_img.height,
            frame_h,
            LOGO_HEIGHT_FRACTION,
        );
        if logo_w > 0.0 && logo_h > 0.0 {
            let frame = FrameSize {
                width: frame_w,
                height: frame_h,
            };
            let pos = geometry::logo_placement(
                settings.logo_corner,
                frame,
                logo_w,
                logo_h,
                LOGO_MARGIN_FRACTION,
            );
            composite::draw_image_scaled(dest, logo_img, pos.x, pos.y, logo_w, logo_h);
        }
    }
}
