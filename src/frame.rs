use jt_core::lifecycle::FrameSlot;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickClosure = Closure<dyn FnMut(f64)>;

/// A `requestAnimationFrame` loop that can be cancelled.
///
/// The tick receives the frame timestamp in milliseconds and returns whether
/// the loop should continue. After [`AnimationLoop::cancel`] no further tick
/// runs and no request stays pending. The loop must not be dropped from
/// inside its own tick.
pub struct AnimationLoop {
    slot: Rc<RefCell<FrameSlot>>,
    closure: Rc<RefCell<Option<TickClosure>>>,
}

impl AnimationLoop {
    pub fn start(mut tick: impl FnMut(f64) -> bool + 'static) -> Self {
        let slot = Rc::new(RefCell::new(FrameSlot::default()));
        let closure: Rc<RefCell<Option<TickClosure>>> = Rc::new(RefCell::new(None));

        let slot_tick = slot.clone();
        let closure_weak: Weak<RefCell<Option<TickClosure>>> = Rc::downgrade(&closure);
        *closure.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            if !slot_tick.borrow_mut().fire() {
                return;
            }
            if !tick(ts) {
                slot_tick.borrow_mut().stop();
                return;
            }
            if let Some(c) = closure_weak.upgrade() {
                request(&slot_tick, &c);
            }
        }) as Box<dyn FnMut(f64)>));

        request(&slot, &closure);
        Self { slot, closure }
    }

    /// Stop the loop and cancel the outstanding frame request. Idempotent.
    pub fn cancel(&self) {
        let pending = self.slot.borrow_mut().stop();
        if let (Some(handle), Some(w)) = (pending, web::window()) {
            _ = w.cancel_animation_frame(handle);
        }
    }

    pub fn is_running(&self) -> bool {
        !self.slot.borrow().is_stopped()
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.cancel();
        self.closure.borrow_mut().take();
    }
}

fn request(slot: &Rc<RefCell<FrameSlot>>, closure: &Rc<RefCell<Option<TickClosure>>>) {
    let Some(w) = web::window() else {
        slot.borrow_mut().stop();
        return;
    };
    let handle = match closure.borrow().as_ref() {
        Some(c) => w.request_animation_frame(c.as_ref().unchecked_ref()),
        None => return,
    };
    match handle {
        Ok(h) => {
            if !slot.borrow_mut().schedule(h) {
                _ = w.cancel_animation_frame(h);
            }
        }
        Err(e) => {
            log::error!("requestAnimationFrame failed: {:?}", e);
            slot.borrow_mut().stop();
        }
    }
}
