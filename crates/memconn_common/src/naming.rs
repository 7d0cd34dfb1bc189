//! Naming conventions for connections created inside a single instance.
//!
//! The graph factory names internal connections after the interfaces or
//! address spaces they join. The path search engine relies on the local
//! memory map name to recognize an address space's embedded memory.

/// Infix marking a self-loop connection from an address space to its local
/// memory map.
pub const LOCAL_MEMORY_MAP_MARKER: &str = "_to_local_memory_map_";

/// Returns the connection name joining an address space to its local memory map.
pub fn local_memory_map_connection_name(space: &str, map: &str) -> String {
    format!("{space}{LOCAL_MEMORY_MAP_MARKER}{map}")
}

/// Returns `true` if `name` follows the local memory map connection convention.
pub fn is_local_memory_map_connection(name: &str) -> bool {
    name.contains(LOCAL_MEMORY_MAP_MARKER)
}

/// Returns the connection name of a transparent bridge from a slave interface
/// to a master interface of the same instance.
pub fn bridge_connection_name(slave: &str, master: &str) -> String {
    format!("{slave}_bridge_to_{master}")
}

/// Returns the name of the synthetic interface carrying a local memory map
/// for an address space that no bus interface references.
pub fn local_interface_name(space: &str) -> String {
    format!("{space} interface")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_map_name_is_recognized() {
        let name = local_memory_map_connection_name("cpu_space", "scratch");
        assert_eq!(name, "cpu_space_to_local_memory_map_scratch");
        assert!(is_local_memory_map_connection(&name));
    }

    #[test]
    fn ordinary_names_are_not_local_maps() {
        assert!(!is_local_memory_map_connection("cpu_to_bus"));
        assert!(!is_local_memory_map_connection(&bridge_connection_name(
            "s0", "m0"
        )));
        assert!(!is_local_memory_map_connection("local_memory_map"));
    }

    #[test]
    fn bridge_name_format() {
        assert_eq!(bridge_connection_name("axi_s", "apb_m"), "axi_s_bridge_to_apb_m");
    }

    #[test]
    fn local_interface_name_format() {
        assert_eq!(local_interface_name("dsp_space"), "dsp_space interface");
    }
}
