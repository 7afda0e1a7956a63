pub mod harbor;

pub use harbor::{
    DropRequested, QuantityCancelled, QuantitySubmitted, TransferCompleted, UnloadAll,
};

// Messages live alongside the subsystems they drive and are re-exported
// here behind a unified namespace, so UI code and future AI players can
// depend on the same definitions without coupling to subsystem internals.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ships::{SailForHarbor, SailForNewWorld};
    use crate::turn_system::EndPlayerTurn;

    #[test]
    fn shared_messages_are_send_sync_static() {
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}

        assert_send_sync_static::<DropRequested>();
        assert_send_sync_static::<QuantitySubmitted>();
        assert_send_sync_static::<QuantityCancelled>();
        assert_send_sync_static::<TransferCompleted>();
        assert_send_sync_static::<UnloadAll>();
        assert_send_sync_static::<SailForNewWorld>();
        assert_send_sync_static::<SailForHarbor>();
        assert_send_sync_static::<EndPlayerTurn>();
    }
}
