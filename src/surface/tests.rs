// src/surface/tests.rs

use std::cell::RefCell;
use std::rc::Rc;

use test_log::test;

use crate::cell::glyph_from_char;
use crate::color::Color;
use crate::config::DisplayConfig;
use crate::display::driver::TextureInfo;
use crate::display::drivers::mock::{DriverCall, MockDriver};
use crate::display::{Display, SharedDriver, TextureId};
use crate::error::Error;
use crate::surface::{ColoredChar, DenseSurface, SparseSurface, Sprite, SpriteSurface, Surface, TextAlignment};

const RED: Color = Color::Rgb(255, 0, 0);

/// Display over a recording driver; tests inspect `driver.calls`.
fn mock_display(columns: u32, rows: u32) -> (Display, Rc<RefCell<MockDriver>>) {
    let driver = Rc::new(RefCell::new(MockDriver::new()));
    let shared: SharedDriver = driver.clone();
    let mut config = DisplayConfig::default();
    config.grid.columns = columns;
    config.grid.rows = rows;
    let display = Display::with_driver(shared, &config).expect("mock display");
    (display, driver)
}

fn sprite_info(id: u32) -> TextureInfo {
    TextureInfo {
        id: TextureId(id),
        width: 24,
        height: 24,
    }
}

#[test]
fn dense_set_cell_round_trips_provided_fields() {
    let (display, _driver) = mock_display(10, 10);
    let mut surface = DenseSurface::new(&display, 10, 10).unwrap();

    surface
        .set_cell(3, 2, Some(b'@' as u16), Some(RED), None)
        .unwrap();
    let cell = surface.cell_at(3, 2).unwrap();
    assert_eq!(cell.glyph, b'@' as u16);
    assert_eq!(cell.fore, RED);
    // Unspecified field keeps its prior value.
    assert_eq!(cell.back, Color::BLACK);

    surface.set_cell(3, 2, None, None, Some(RED)).unwrap();
    let cell = surface.cell_at(3, 2).unwrap();
    assert_eq!(cell.glyph, b'@' as u16);
    assert_eq!(cell.back, RED);
}

#[test]
fn dense_elides_redundant_writes() {
    let (mut display, _driver) = mock_display(10, 10);
    let mut surface = DenseSurface::new(&display, 10, 10).unwrap();
    surface
        .set_cell(1, 1, Some(b'#' as u16), Some(RED), Some(Color::BLACK))
        .unwrap();
    surface.render(&mut display);
    assert!(!surface.is_dirty());

    // Same triple again: no dirtying.
    surface
        .set_cell(1, 1, Some(b'#' as u16), Some(RED), Some(Color::BLACK))
        .unwrap();
    assert!(!surface.is_dirty());

    // Different triple: dirty again.
    surface
        .set_cell(1, 1, Some(b'#' as u16), Some(Color::WHITE), Some(Color::BLACK))
        .unwrap();
    assert!(surface.is_dirty());
}

#[test]
fn dirty_flag_lifecycle() {
    let (mut display, _driver) = mock_display(10, 10);
    let mut surface = DenseSurface::new(&display, 4, 4).unwrap();
    assert!(surface.is_dirty(), "fresh surface must render once");

    surface.render(&mut display);
    assert!(!surface.is_dirty());

    surface.put_char(0, 0, 'x').unwrap();
    assert!(surface.is_dirty());
    surface.render(&mut display);

    surface.clear();
    assert!(surface.is_dirty());
    surface.render(&mut display);

    surface.draw_sprite(Sprite::new(0, 0, sprite_info(99))).unwrap();
    assert!(surface.is_dirty());
}

#[test]
fn render_is_idempotent_while_clean() {
    let (mut display, driver) = mock_display(10, 10);
    let mut surface = DenseSurface::new(&display, 4, 4).unwrap();
    surface.render(&mut display);

    driver.borrow_mut().clear_calls();
    surface.render(&mut display);
    assert!(driver.borrow().calls.is_empty(), "clean render must not touch the driver");
}

#[test]
fn dense_out_of_bounds_writes_are_silent_noops() {
    let (display, _driver) = mock_display(10, 10);
    let mut surface = DenseSurface::new(&display, 10, 10).unwrap();
    // Make the surface clean-tracking observable.
    let before: Vec<_> = (0..10)
        .flat_map(|y| (0..10).map(move |x| (x, y)))
        .map(|(x, y)| *surface.cell_at(x, y).unwrap())
        .collect();

    surface.set_cell(-1, 0, Some(b'X' as u16), Some(RED), Some(RED)).unwrap();
    surface.set_cell(10, 10, Some(b'X' as u16), Some(RED), Some(RED)).unwrap();
    surface.set_cell(0, -1, Some(b'X' as u16), Some(RED), Some(RED)).unwrap();

    let after: Vec<_> = (0..10)
        .flat_map(|y| (0..10).map(move |x| (x, y)))
        .map(|(x, y)| *surface.cell_at(x, y).unwrap())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn dense_render_issues_one_draw_per_cell() {
    // The end-to-end scenario: 10x5 grid, one cell changed.
    let (mut display, driver) = mock_display(10, 5);
    let mut surface = DenseSurface::new(&display, 10, 5).unwrap();
    surface
        .set_cell(3, 2, Some(b'@' as u16), Some(RED), Some(Color::BLACK))
        .unwrap();

    driver.borrow_mut().clear_calls();
    surface.render(&mut display);
    assert!(!surface.is_dirty());

    let drv = driver.borrow();
    // One background fill per cell.
    let fills = drv.count(|c| matches!(c, DriverCall::FillRect { .. }));
    assert_eq!(fills, 50);
    // 49 default glyph blits tinted white, exactly one tinted red.
    let red = crate::color::Rgb::new(255, 0, 0);
    let white = crate::color::Rgb::WHITE;
    let red_copies = drv.count(|c| matches!(c, DriverCall::Copy { tint: Some(t), .. } if *t == red));
    let white_copies =
        drv.count(|c| matches!(c, DriverCall::Copy { tint: Some(t), .. } if *t == white));
    assert_eq!(red_copies, 1);
    assert_eq!(white_copies, 49);
}

#[test]
fn sparse_clear_removes_all_cells() {
    let (mut display, driver) = mock_display(10, 10);
    let mut surface = SparseSurface::new(&display, 10, 10).unwrap();
    surface.put_char(1, 1, 'a').unwrap();
    surface.put_char(2, 2, 'b').unwrap();
    assert_eq!(surface.populated(), 2);

    surface.clear();
    assert_eq!(surface.populated(), 0);
    assert!(surface.is_dirty());

    driver.borrow_mut().clear_calls();
    surface.render(&mut display);
    let drv = driver.borrow();
    // Target selected and cleared, but zero cells drawn.
    assert_eq!(drv.count(|c| matches!(c, DriverCall::FillRect { .. })), 0);
    assert_eq!(drv.count(|c| matches!(c, DriverCall::Copy { .. })), 0);
    assert_eq!(drv.count(|c| matches!(c, DriverCall::ClearTarget)), 1);
}

#[test]
fn sparse_merges_into_existing_cells() {
    let (display, _driver) = mock_display(10, 10);
    let mut surface = SparseSurface::new(&display, 10, 10).unwrap();

    // No prior entry: unspecified fields come from surface defaults.
    surface.set_cell(4, 4, Some(b'~' as u16), None, None).unwrap();
    let cell = surface.cell_at(4, 4).unwrap();
    assert_eq!(cell.fore, Color::WHITE);
    assert_eq!(cell.back, Color::BLACK);

    // Existing entry: unspecified fields keep the prior value.
    surface.set_cell(4, 4, None, Some(RED), None).unwrap();
    let cell = surface.cell_at(4, 4).unwrap();
    assert_eq!(cell.glyph, b'~' as u16);
    assert_eq!(cell.fore, RED);
}

#[test]
fn sparse_bounds_match_dense_behavior() {
    let (display, _driver) = mock_display(10, 10);
    let mut surface = SparseSurface::new(&display, 10, 10).unwrap();
    surface.set_cell(-3, 50, Some(b'X' as u16), None, None).unwrap();
    assert_eq!(surface.populated(), 0);
}

#[test]
fn sparse_rejects_sprites() {
    let (display, _driver) = mock_display(10, 10);
    let mut surface = SparseSurface::new(&display, 10, 10).unwrap();
    let err = surface.draw_sprite(Sprite::new(0, 0, sprite_info(7))).unwrap_err();
    assert!(matches!(err, Error::Unsupported { .. }));
}

#[test]
fn sprite_surface_rejects_cell_operations() {
    let (display, _driver) = mock_display(10, 10);
    let mut surface = SpriteSurface::new(&display, 10, 10).unwrap();
    let err = surface.put_char(0, 0, '@').unwrap_err();
    assert!(matches!(
        err,
        Error::Unsupported {
            surface: "sprite",
            operation: "cell drawing"
        }
    ));
}

#[test]
fn sprites_render_in_stable_z_order_above_cells() {
    let (mut display, driver) = mock_display(10, 10);
    let mut surface = DenseSurface::new(&display, 2, 2).unwrap();

    let first_high = sprite_info(101);
    let low = sprite_info(102);
    let second_high = sprite_info(103);
    surface.draw_sprite(Sprite::with_z(0, 0, 5, first_high)).unwrap();
    surface.draw_sprite(Sprite::with_z(0, 0, 1, low)).unwrap();
    surface.draw_sprite(Sprite::with_z(0, 0, 5, second_high)).unwrap();

    driver.borrow_mut().clear_calls();
    surface.render(&mut display);

    let drv = driver.borrow();
    let sprite_order: Vec<TextureId> = drv
        .calls
        .iter()
        .filter_map(|c| match c {
            // Sprite copies are untinted; glyph copies carry a tint.
            DriverCall::Copy { src, tint: None, .. } => Some(*src),
            _ => None,
        })
        .collect();
    assert_eq!(sprite_order, vec![low.id, first_high.id, second_high.id]);

    // All cell draws precede the first sprite draw.
    let first_sprite = drv
        .calls
        .iter()
        .position(|c| matches!(c, DriverCall::Copy { tint: None, .. }))
        .unwrap();
    let last_fill = drv
        .calls
        .iter()
        .rposition(|c| matches!(c, DriverCall::FillRect { .. }))
        .unwrap();
    assert!(last_fill < first_sprite);
}

#[test]
fn print_honors_alignment() {
    let (display, _driver) = mock_display(20, 5);
    let mut surface = DenseSurface::new(&display, 20, 5).unwrap();

    surface.print(10, 0, "abcd", Color::WHITE, None, TextAlignment::Left).unwrap();
    assert_eq!(surface.cell_at(10, 0).unwrap().glyph, b'a' as u16);

    surface.print(10, 1, "abcd", Color::WHITE, None, TextAlignment::Center).unwrap();
    assert_eq!(surface.cell_at(8, 1).unwrap().glyph, b'a' as u16);
    assert_eq!(surface.cell_at(11, 1).unwrap().glyph, b'd' as u16);

    surface.print(10, 2, "abcd", Color::WHITE, None, TextAlignment::Right).unwrap();
    assert_eq!(surface.cell_at(6, 2).unwrap().glyph, b'a' as u16);
    assert_eq!(surface.cell_at(9, 2).unwrap().glyph, b'd' as u16);
    assert_eq!(surface.cell_at(10, 2).unwrap().glyph, b' ' as u16);
}

#[test]
fn print_colored_falls_back_to_default_foreground() {
    let (display, _driver) = mock_display(10, 3);
    let mut surface = DenseSurface::new(&display, 10, 3).unwrap();
    surface.set_default_fore(Color::Indexed(1));

    let text = [
        ColoredChar { ch: 'h', color: Some(RED) },
        ColoredChar { ch: 'i', color: None },
    ];
    surface.print_colored(0, 0, &text, None, TextAlignment::Left).unwrap();
    assert_eq!(surface.cell_at(0, 0).unwrap().fore, RED);
    assert_eq!(surface.cell_at(1, 0).unwrap().fore, Color::Indexed(1));
}

#[test]
fn print_frame_draws_box_corners() {
    let (display, _driver) = mock_display(10, 6);
    let mut surface = DenseSurface::new(&display, 10, 6).unwrap();
    surface.print_frame(0, 0, 10, 6, true).unwrap();

    assert_eq!(surface.cell_at(0, 0).unwrap().glyph, glyph_from_char('╔'));
    assert_eq!(surface.cell_at(9, 0).unwrap().glyph, glyph_from_char('╗'));
    assert_eq!(surface.cell_at(0, 5).unwrap().glyph, glyph_from_char('╚'));
    assert_eq!(surface.cell_at(9, 5).unwrap().glyph, glyph_from_char('╝'));
    assert_eq!(surface.cell_at(4, 0).unwrap().glyph, glyph_from_char('═'));
    assert_eq!(surface.cell_at(0, 3).unwrap().glyph, glyph_from_char('║'));
    assert_eq!(surface.cell_at(5, 3).unwrap().glyph, b' ' as u16);
}

#[test]
fn reset_colors_restores_white_on_black() {
    let (display, _driver) = mock_display(4, 4);
    let mut surface = SparseSurface::new(&display, 4, 4).unwrap();
    surface.set_default_fore(RED);
    surface.set_default_back(RED);
    surface.reset_colors();
    assert_eq!(surface.default_fore(), Color::WHITE);
    assert_eq!(surface.default_back(), Color::BLACK);
}

#[test]
fn set_render_position_scales_to_pixels() {
    let (display, _driver) = mock_display(80, 25);
    let mut surface = DenseSurface::new(&display, 20, 10).unwrap();
    surface.set_render_position(4, 3);
    let rect = surface.render_rect();
    assert_eq!(rect.x, 32);
    assert_eq!(rect.y, 24);
    assert_eq!(rect.width, 160);
    assert_eq!(rect.height, 80);
}
