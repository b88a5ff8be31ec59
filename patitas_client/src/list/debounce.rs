use std::time::Duration;

use actix::prelude::*;

/// A value that trails its live input by a quiescence window.
///
/// The timer lives on the owning actor's context, so at most one settle is
/// pending at a time and none fires after the actor stops.
pub struct Debounce<T> {
    delay: Duration,
    settled: T,
    live: T,
    pending: Option<SpawnHandle>,
}

impl<T> Debounce<T>
where
    T: Clone + PartialEq + 'static,
{
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            settled: initial.clone(),
            live: initial,
            pending: None,
        }
    }

    /// The last settled value.
    pub fn value(&self) -> &T {
        &self.settled
    }

    pub fn live(&self) -> &T {
        &self.live
    }

    /// Records a live change and restarts the window.
    ///
    /// `lens` finds this debounce again inside the actor when the timer
    /// fires; `on_settle` runs once per fired timer, after the live value
    /// became the settled one, and is told whether it changed.
    pub fn push<A>(
        &mut self,
        value: T,
        ctx: &mut Context<A>,
        lens: fn(&mut A) -> &mut Debounce<T>,
        on_settle: fn(&mut A, bool, &mut Context<A>),
    ) where
        A: Actor<Context = Context<A>>,
    {
        self.live = value;
        self.cancel(ctx);
        let handle = ctx.run_later(self.delay, move |act, ctx| {
            let debounce = lens(act);
            debounce.pending = None;
            let changed = debounce.settle();
            on_settle(act, changed, ctx);
        });
        self.pending = Some(handle);
    }

    pub fn cancel<A>(&mut self, ctx: &mut Context<A>)
    where
        A: Actor<Context = Context<A>>,
    {
        if let Some(handle) = self.pending.take() {
            ctx.cancel_future(handle);
        }
    }

    fn settle(&mut self) -> bool {
        if self.live == self.settled {
            return false;
        }
        self.settled = self.live.clone();
        true
    }
}
