use shared::ModalState;
use yew::prelude::*;

/// A modal's open flag together with the record it was opened for
#[derive(Clone, PartialEq)]
pub struct UseModalHandle<C: Clone + PartialEq + 'static> {
    state: UseStateHandle<ModalState<C>>,
}

impl<C: Clone + PartialEq + 'static> UseModalHandle<C> {
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn context(&self) -> Option<C> {
        self.state.context().cloned()
    }

    pub fn open(&self) {
        let mut next = (*self.state).clone();
        next.open();
        self.state.set(next);
    }

    pub fn open_with(&self, context: C) {
        let mut next = (*self.state).clone();
        next.open_with(context);
        self.state.set(next);
    }

    pub fn close(&self) {
        self.state.set(ModalState::closed());
    }

    /// Callback suitable for a modal's `on_close`
    pub fn close_callback(&self) -> Callback<()> {
        let handle = self.clone();
        Callback::from(move |_| handle.close())
    }
}

#[hook]
pub fn use_modal<C: Clone + PartialEq + 'static>() -> UseModalHandle<C> {
    let state = use_state(ModalState::<C>::closed);
    UseModalHandle { state }
}
