//! The connection legality rule between adjacent interfaces on a route.

use memconn_common::InterfaceMode;
use memconn_graph::InterfaceVertex;

/// Returns `true` if a route may step from `current` to `next`.
///
/// The full transition table:
///
/// | current          | next             | condition                              |
/// |------------------|------------------|----------------------------------------|
/// | any              | same mode        | either side hierarchical               |
/// | `Master`         | `Slave`          | different instances                    |
/// | `Master`         | `MirroredMaster` | always                                 |
/// | `Slave`          | `MirroredSlave`  | always                                 |
/// | `Slave`          | `Master`         | both bridged, same instance            |
/// | `MirroredMaster` | `MirroredSlave`  | same instance                          |
/// | `MirroredSlave`  | `Slave`          | always                                 |
/// | `MirroredSlave`  | `MirroredMaster` | same instance                          |
///
/// Every other pair is illegal, and a vertex never connects to itself.
pub fn can_connect(current: &InterfaceVertex, next: &InterfaceVertex) -> bool {
    use InterfaceMode::*;

    if current.id == next.id {
        return false;
    }
    let same_instance = current.instance == next.instance;
    let hierarchical = current.hierarchical || next.hierarchical;

    match (current.mode, next.mode) {
        (a, b) if a == b => hierarchical,
        (Master, Slave) => !same_instance,
        (Master, MirroredMaster) => true,
        (Slave, MirroredSlave) => true,
        (Slave, Master) => current.bridged && next.bridged && same_instance,
        (MirroredMaster, MirroredSlave) => same_instance,
        (MirroredSlave, Slave) => true,
        (MirroredSlave, MirroredMaster) => same_instance,
        _ => false,
    }
}
