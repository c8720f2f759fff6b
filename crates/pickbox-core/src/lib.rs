//! Core types and traits for the Pickbox combo box widget.
//!
//! This crate provides foundational types used throughout Pickbox:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] with WCAG contrast calculations
//! - Layout constraints: [`Constraints`]
//! - Input events: [`Event`], [`Key`], [`MouseButton`]
//! - Painting: [`Canvas`], [`RecordingCanvas`], [`DrawCommand`]
//! - Elm-style state: [`State`], [`Command`], [`Store`]

mod canvas;
mod color;
mod constraints;
pub mod draw;
mod event;
mod geometry;
mod state;
pub mod widget;

pub use canvas::RecordingCanvas;
pub use color::Color;
pub use constraints::Constraints;
pub use draw::{BoxStyle, DrawCommand, StrokeStyle};
pub use event::{Event, Key, MouseButton};
pub use geometry::{CornerRadius, Point, Rect, Size};
pub use state::{Command, State, Store};
pub use widget::{AccessibleRole, Canvas, LayoutResult, TextStyle, TypeId, Widget};

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // COLOR TESTS
    // ==========================================================================

    mod color_tests {
        use super::*;
        use proptest::prelude::*;

        #[test]
        fn test_color_new_clamps_values() {
            let c = Color::new(1.5, -0.5, 0.5, 2.0);
            assert_eq!(c.r, 1.0);
            assert_eq!(c.g, 0.0);
            assert_eq!(c.b, 0.5);
            assert_eq!(c.a, 1.0);
        }

        #[test]
        fn test_color_rgba8_accent() {
            let accent = Color::rgba8(181, 66, 19, 1.0);
            assert!((accent.r - 181.0 / 255.0).abs() < 1e-6);
            assert_eq!(accent.to_css(), "rgba(181, 66, 19, 1)");
            assert_eq!(accent.with_alpha(0.6).to_css(), "rgba(181, 66, 19, 0.6)");
        }

        #[test]
        fn test_color_contrast_ratio_black_white() {
            let ratio = Color::BLACK.contrast_ratio(&Color::WHITE);
            assert!((ratio - 21.0).abs() < 0.1);
        }

        #[test]
        fn test_selected_row_text_is_legible() {
            // White label on the accent fill
            let accent = Color::rgba8(181, 66, 19, 1.0);
            assert!(Color::WHITE.contrast_ratio(&accent) >= 4.5);
        }

        #[test]
        fn test_legible_text_picks_higher_contrast() {
            let accent = Color::rgba8(181, 66, 19, 1.0);
            assert_eq!(accent.legible_text(), Color::WHITE);
            let pale = Color::rgba8(250, 220, 120, 1.0);
            assert_eq!(pale.legible_text(), Color::BLACK);
        }

        proptest! {
            #[test]
            fn prop_color_clamps_to_valid_range(r in -1.0f32..2.0, g in -1.0f32..2.0, b in -1.0f32..2.0, a in -1.0f32..2.0) {
                let c = Color::new(r, g, b, a);
                prop_assert!((0.0..=1.0).contains(&c.r));
                prop_assert!((0.0..=1.0).contains(&c.g));
                prop_assert!((0.0..=1.0).contains(&c.b));
                prop_assert!((0.0..=1.0).contains(&c.a));
            }

            #[test]
            fn prop_legible_text_meets_large_text_contrast(r in 0.0f32..1.0, g in 0.0f32..1.0, b in 0.0f32..1.0) {
                let c = Color::new(r, g, b, 1.0);
                prop_assert!(c.legible_text().contrast_ratio(&c) >= 3.0);
            }

            #[test]
            fn prop_contrast_ratio_symmetric(r in 0.0f32..1.0, g in 0.0f32..1.0, b in 0.0f32..1.0) {
                let c = Color::new(r, g, b, 1.0);
                prop_assert!((c.contrast_ratio(&Color::WHITE) - Color::WHITE.contrast_ratio(&c)).abs() < 1e-5);
            }
        }
    }

    // ==========================================================================
    // GEOMETRY TESTS
    // ==========================================================================

    mod geometry_tests {
        use super::*;
        use proptest::prelude::*;

        #[test]
        fn test_rect_edges() {
            let r = Rect::new(10.0, 20.0, 30.0, 40.0);
            assert_eq!(r.right(), 40.0);
            assert_eq!(r.bottom(), 60.0);
            assert_eq!(r.center(), Point::new(25.0, 40.0));
        }

        #[test]
        fn test_rect_contains_point_inclusive_edges() {
            let r = Rect::new(0.0, 0.0, 10.0, 10.0);
            assert!(r.contains_point(&Point::new(0.0, 0.0)));
            assert!(r.contains_point(&Point::new(10.0, 10.0)));
            assert!(!r.contains_point(&Point::new(10.1, 5.0)));
        }

        #[test]
        fn test_rect_union() {
            let a = Rect::new(0.0, 0.0, 10.0, 10.0);
            let b = Rect::new(0.0, 11.0, 10.0, 20.0);
            assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 10.0, 31.0));
        }

        #[test]
        fn test_rect_inset() {
            let r = Rect::new(0.0, 0.0, 10.0, 10.0).inset(2.0);
            assert_eq!(r, Rect::new(2.0, 2.0, 6.0, 6.0));
        }

        #[test]
        fn test_point_arithmetic() {
            let p = Point::new(1.0, 2.0) + Point::new(3.0, 4.0);
            assert_eq!(p, Point::new(4.0, 6.0));
            assert_eq!(p - Point::new(4.0, 6.0), Point::ORIGIN);
            assert_eq!(Point::ORIGIN.offset(5.0, -1.0), Point::new(5.0, -1.0));
        }

        proptest! {
            #[test]
            fn prop_union_contains_both(
                x in -100.0f32..100.0, y in -100.0f32..100.0,
                w in 0.0f32..50.0, h in 0.0f32..50.0,
            ) {
                let a = Rect::new(x, y, w, h);
                let b = Rect::new(0.0, 0.0, 10.0, 10.0);
                let u = a.union(&b);
                prop_assert!(u.contains_point(&a.center()));
                prop_assert!(u.contains_point(&b.center()));
            }
        }
    }

    // ==========================================================================
    // CONSTRAINTS TESTS
    // ==========================================================================

    mod constraints_tests {
        use super::*;

        #[test]
        fn test_constraints_tight() {
            let c = Constraints::tight(Size::new(100.0, 50.0));
            assert!(c.is_tight());
            assert_eq!(c.constrain(Size::new(10.0, 10.0)), Size::new(100.0, 50.0));
        }

        #[test]
        fn test_constraints_loose() {
            let c = Constraints::loose(Size::new(250.0, 40.0));
            assert_eq!(c.constrain(Size::new(400.0, 20.0)), Size::new(250.0, 20.0));
        }

        #[test]
        fn test_constraints_default_unbounded() {
            let c = Constraints::default();
            assert_eq!(c.max_width, f32::INFINITY);
            assert!(!c.is_tight());
        }
    }
}
