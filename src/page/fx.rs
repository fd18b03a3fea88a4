//! Visual FX: particle background and 3D tilt hover
//!
//! Both run independently of the game; the particle canvas has its own rAF
//! chain that never stops.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

const PARTICLE_COUNT: usize = 60;

struct Particle {
    pos: Vec2,
    vel: Vec2,
    size: f32,
    alpha: f32,
}

impl Particle {
    fn spawn(rng: &mut Pcg32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height),
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * 0.5,
                (rng.random::<f32>() - 0.5) * 0.5,
            ),
            size: rng.random::<f32>() * 2.0,
            alpha: rng.random::<f32>() * 0.5,
        }
    }

    fn update(&mut self, rng: &mut Pcg32, width: f32, height: f32, now_ms: f64) {
        self.pos += self.vel;
        let off = self.pos.x < 0.0
            || self.pos.x > width
            || self.pos.y < 0.0
            || self.pos.y > height;
        if off {
            *self = Self::spawn(rng, width, height);
        }
        self.alpha = 0.3 + ((now_ms * 0.005) as f32 + self.pos.x).sin() * 0.2;
    }
}

struct ParticleField {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    rng: Pcg32,
    particles: Vec<Particle>,
}

impl ParticleField {
    fn resize(&mut self) {
        let window = web_sys::window().expect("no window");
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    fn frame(&mut self, now_ms: f64) {
        let width = self.canvas.width() as f32;
        let height = self.canvas.height() as f32;
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
        for p in &mut self.particles {
            p.update(&mut self.rng, width, height, now_ms);
            self.ctx
                .set_fill_style_str(&format!("rgba(100, 200, 255, {})", p.alpha));
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                p.pos.x as f64,
                p.pos.y as f64,
                p.size as f64,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.fill();
        }
    }
}

/// Start the particle background on `#particleCanvas`. Missing canvas or
/// context just skips the effect.
pub fn init_particles(document: &Document, seed: u64) {
    let Some(canvas) = document
        .get_element_by_id("particleCanvas")
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    else {
        log::warn!("No particle canvas, background FX disabled");
        return;
    };
    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        return;
    };

    let mut field = ParticleField {
        canvas,
        ctx,
        rng: Pcg32::seed_from_u64(seed),
        particles: Vec::with_capacity(PARTICLE_COUNT),
    };
    field.resize();
    let width = field.canvas.width() as f32;
    let height = field.canvas.height() as f32;
    for _ in 0..PARTICLE_COUNT {
        let p = Particle::spawn(&mut field.rng, width, height);
        field.particles.push(p);
    }

    let field = Rc::new(RefCell::new(field));

    // Keep the backdrop matched to the viewport
    {
        let field = field.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            field.borrow_mut().resize();
        });
        let window = web_sys::window().expect("no window");
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    schedule_particle_frame(field);
}

fn schedule_particle_frame(field: Rc<RefCell<ParticleField>>) {
    let closure = Closure::once(move |time: f64| {
        field.borrow_mut().frame(time);
        schedule_particle_frame(field);
    });
    let window = web_sys::window().expect("no window");
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Wire the perspective tilt on every `[data-tilt]` element
pub fn init_tilt(document: &Document) {
    let Ok(elements) = document.query_selector_all("[data-tilt]") else {
        return;
    };
    for i in 0..elements.length() {
        let Some(el) = elements.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };

        {
            let el = el.clone();
            let target = el.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
                let rect = target.get_bounding_client_rect();
                let x = event.client_x() as f64 - rect.left();
                let y = event.client_y() as f64 - rect.top();
                let x_deg = (x / rect.width() - 0.5) * 10.0;
                let y_deg = (y / rect.height() - 0.5) * -10.0;
                let _ = target.style().set_property(
                    "transform",
                    &format!(
                        "perspective(1000px) rotateX({y_deg:.2}deg) rotateY({x_deg:.2}deg) scale(1.01)"
                    ),
                );
            });
            let _ =
                el.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let target = el.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let _ = target.style().set_property(
                    "transform",
                    "perspective(1000px) rotateX(0) rotateY(0) scale(1)",
                );
            });
            let _ =
                el.add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}
