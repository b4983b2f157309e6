//! Table rendering for namespace records.
//!
//! Tables use an ASCII grid with centred cells.

use namespaxe_core::utils::{convert_date, cpu_millis, display_value, with_unit};
use namespaxe_core::Namespace;
use tabled::settings::object::Segment;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

pub const NO_NAMESPACES: &str = "No namespaces found.";

pub const HELP_TEXT: &str = "
        namespaxe CLI Tool

        Commands:
            login              - Log in to the web server
            list <resource>    - List resources (e.g., 'ns' for namespaces)
            describe <res> <name> - Describe a specific resource (e.g., 'ns <namespace-name>')
            install-k8s-config <res> <name> - Install the Kubernetes config for a resource
            help               - Show this help menu

        Options:
            --wide             - Show extra details
        ";

#[derive(Tabled)]
struct NamespaceRow {
    #[tabled(rename = "Namespace Name")]
    name: String,
}

#[derive(Tabled)]
struct WideNamespaceRow {
    #[tabled(rename = "Namespace Name")]
    name: String,
    #[tabled(rename = "Billed Date")]
    billed_date: String,
    #[tabled(rename = "Expire Date")]
    expire_date: String,
    #[tabled(rename = "Namespace ID")]
    namespace_id: String,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl FieldRow {
    fn new(field: &'static str, value: String) -> Self {
        Self { field, value }
    }
}

fn pretty<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows)
        .with(Style::ascii())
        .with(Modify::new(Segment::all()).with(Alignment::center()))
        .to_string()
}

/// Table for `list`. Returns the "nothing found" message for an empty list.
pub fn render_namespace_list(records: &[Namespace], wide: bool) -> String {
    if records.is_empty() {
        return NO_NAMESPACES.to_string();
    }

    if wide {
        let rows = records
            .iter()
            .map(|ns| WideNamespaceRow {
                name: display_value(ns.ns_name.as_ref()),
                billed_date: convert_date(ns.billed_date.as_ref()),
                expire_date: convert_date(ns.expire_date.as_ref()),
                namespace_id: display_value(ns.user_id.as_ref()),
            })
            .collect();
        pretty::<WideNamespaceRow>(rows)
    } else {
        let rows = records
            .iter()
            .map(|ns| NamespaceRow {
                name: display_value(ns.ns_name.as_ref()),
            })
            .collect();
        pretty::<NamespaceRow>(rows)
    }
}

/// Two-column `Field | Value` table for `describe`.
pub fn render_namespace_detail(ns: &Namespace, wide: bool) -> String {
    let mut rows = vec![
        FieldRow::new("Namespace Name", display_value(ns.ns_name.as_ref())),
        FieldRow::new("Billed Date", convert_date(ns.billed_date.as_ref())),
        FieldRow::new("Expire Date", convert_date(ns.expire_date.as_ref())),
        FieldRow::new("Namespace ID", display_value(ns.user_id.as_ref())),
    ];

    if wide {
        let storage_unit = format!("{}i", display_value(ns.volume_size_unit.as_ref()));
        rows.extend([
            FieldRow::new("Package Name", display_value(ns.package_name.as_ref())),
            FieldRow::new("State", display_value(ns.state.as_ref())),
            FieldRow::new("CPU", cpu_millis(ns.cpu.as_ref())),
            FieldRow::new("RAM", with_unit(ns.ram.as_ref(), "Mi")),
            FieldRow::new("Pods", display_value(ns.pods.as_ref())),
            FieldRow::new("Secrets", display_value(ns.secrets.as_ref())),
            FieldRow::new("ConfigMaps", display_value(ns.configmaps.as_ref())),
            FieldRow::new("Services", display_value(ns.service.as_ref())),
            FieldRow::new("Ingress", display_value(ns.ingress.as_ref())),
            FieldRow::new("PVC Count", display_value(ns.pvc_count.as_ref())),
            FieldRow::new(
                "Total Storage Requests",
                with_unit(ns.total_storage_requests.as_ref(), &storage_unit),
            ),
            FieldRow::new(
                "Max PVC Storage Request",
                with_unit(ns.max_pvc_storage_request.as_ref(), &storage_unit),
            ),
        ]);
    }

    pretty(rows)
}
