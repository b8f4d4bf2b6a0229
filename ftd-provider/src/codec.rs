//! Conversion between client models and generic attribute values
//!
//! Flatten functions turn typed API objects into nested maps and lists for
//! state. Restore functions go the other way for request bodies. An
//! embedded object whose `type` discriminator is empty is treated as absent.

use std::collections::HashMap;

use ftd_client::models::{
    AccessDefaultAction, AdvancedSettings, ApplicationFilterCondition, EmbeddedAppFilter,
    EmbeddedURLFilter, HAIPv4Address, InterfaceIPv4, ProductivityCondition, ReferenceModel,
    RiskCondition, TrafficEntry, TypeCondition, URLCategoryMatcher,
};
use ftd_core::provider::{ProviderError, ProviderResult};
use ftd_core::resource::Value;

use crate::utils::{AttributeReader, NestedReader, insert_some};

// =============================================================================
// Reference Codec
// =============================================================================

fn reference_value(reference: &ReferenceModel) -> Value {
    Value::map([
        ("id", Value::string(&reference.id)),
        ("type", Value::string(&reference.kind)),
        ("name", Value::string(&reference.name)),
    ])
}

/// Flatten a reference collection, preserving order.
///
/// Yields `None` if any entry has an empty `type`.
pub fn flatten_references(references: &[ReferenceModel]) -> Option<Vec<Value>> {
    references
        .iter()
        .map(|r| (!r.kind.is_empty()).then(|| reference_value(r)))
        .collect()
}

/// Flatten a single optional reference into a one-element list
pub fn flatten_reference(reference: Option<&ReferenceModel>) -> Option<Vec<Value>> {
    reference
        .filter(|r| !r.kind.is_empty())
        .map(|r| vec![reference_value(r)])
}

fn reference_list(references: &[ReferenceModel]) -> Option<Value> {
    flatten_references(references).map(Value::List)
}

fn single_reference(reference: Option<&ReferenceModel>) -> Option<Value> {
    flatten_reference(reference).map(Value::List)
}

/// Restore references from a list or set of `{id, type, name}` maps
pub fn restore_references(value: Option<&Value>) -> ProviderResult<Vec<ReferenceModel>> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let items = value.as_items().ok_or_else(|| {
        ProviderError::decode(format!(
            "reference collection must be a list or set, got {}",
            value.type_name()
        ))
    })?;

    items
        .iter()
        .map(|item| match item {
            Value::Map(map) => {
                let reader = AttributeReader::new(map);
                Ok(ReferenceModel {
                    id: reader.required_string("id")?,
                    kind: reader.required_string("type")?,
                    name: reader.string("name")?,
                })
            }
            other => Err(ProviderError::decode(format!(
                "reference must be a block, got {}",
                other.type_name()
            ))),
        })
        .collect()
}

/// First restored reference, if any
pub fn restore_reference(value: Option<&Value>) -> ProviderResult<Option<ReferenceModel>> {
    Ok(restore_references(value)?.into_iter().next())
}

// =============================================================================
// Interface Addressing
// =============================================================================

pub fn flatten_ha_ipv4_address(address: Option<&HAIPv4Address>) -> Option<Vec<Value>> {
    address.map(|a| {
        vec![Value::map([
            ("ipaddress", Value::string(&a.ip_address)),
            ("netmask", Value::string(&a.netmask)),
            ("standbyipaddress", Value::string(&a.standby_ip_address)),
            ("type", Value::string(&a.kind)),
        ])]
    })
}

pub fn flatten_interface_ipv4(ipv4: Option<&InterfaceIPv4>) -> Option<Vec<Value>> {
    let ipv4 = ipv4?;
    let mut map = HashMap::new();
    map.insert("iptype".to_string(), Value::string(&ipv4.ip_type));
    map.insert(
        "defaultrouteusingdhcp".to_string(),
        Value::Bool(ipv4.default_route_using_dhcp),
    );
    map.insert(
        "dhcproutemetric".to_string(),
        Value::Int(ipv4.dhcp_route_metric),
    );
    insert_some(
        &mut map,
        "ipaddress",
        flatten_ha_ipv4_address(ipv4.ip_address.as_ref()).map(Value::List),
    );
    map.insert("dhcp".to_string(), Value::Bool(ipv4.dhcp));
    map.insert("addressnull".to_string(), Value::Bool(ipv4.address_null));
    map.insert("type".to_string(), Value::string(&ipv4.kind));
    Some(vec![Value::Map(map)])
}

pub fn restore_interface_ipv4(reader: AttributeReader<'_>) -> ProviderResult<InterfaceIPv4> {
    let ip_address = match reader.block("ipaddress")? {
        Some(block) => {
            let r = block.reader();
            Some(HAIPv4Address {
                ip_address: r.string("ipaddress")?,
                netmask: r.string("netmask")?,
                standby_ip_address: r.string("standbyipaddress")?,
                kind: r.string("type")?,
            })
        }
        None => None,
    };

    Ok(InterfaceIPv4 {
        ip_type: reader.string("iptype")?,
        default_route_using_dhcp: reader.bool("defaultrouteusingdhcp")?,
        dhcp_route_metric: reader.int("dhcproutemetric")?,
        ip_address,
        dhcp: reader.bool("dhcp")?,
        address_null: reader.bool("addressnull")?,
        kind: reader.string("type")?,
    })
}

// =============================================================================
// Traffic Users
// =============================================================================

pub fn flatten_users(users: &[TrafficEntry]) -> Vec<Value> {
    users
        .iter()
        .map(|user| {
            let mut map = HashMap::new();
            map.insert("type".to_string(), Value::string(&user.kind));
            map.insert("name".to_string(), Value::string(&user.name));
            insert_some(
                &mut map,
                "identitysource",
                single_reference(Some(&user.identity_source)),
            );
            Value::Map(map)
        })
        .collect()
}

/// Restore users; each entry must name its identity source
pub fn restore_users(blocks: &[NestedReader<'_>]) -> ProviderResult<Vec<TrafficEntry>> {
    blocks
        .iter()
        .map(|block| {
            let r = block.reader();
            let identity_source = restore_reference(r.value("identitysource"))?.ok_or_else(|| {
                ProviderError::decode(format!(
                    "user '{}' has no identitysource",
                    r.string("name").unwrap_or_default()
                ))
            })?;
            Ok(TrafficEntry {
                name: r.string("name")?,
                identity_source,
                kind: r.string("type")?,
            })
        })
        .collect()
}

// =============================================================================
// Application Filter Conditions
// =============================================================================

pub fn flatten_conditions(conditions: &[ApplicationFilterCondition]) -> Vec<Value> {
    conditions
        .iter()
        .map(|condition| {
            let mut map = HashMap::new();
            map.insert("type".to_string(), Value::string(&condition.kind));
            map.insert("filter".to_string(), Value::string(&condition.filter));
            map.insert(
                "risks".to_string(),
                Value::List(
                    condition
                        .risks
                        .iter()
                        .map(|r| {
                            Value::map([
                                ("risk", Value::string(&r.risk)),
                                ("type", Value::string(&r.kind)),
                            ])
                        })
                        .collect(),
                ),
            );
            map.insert(
                "productivities".to_string(),
                Value::List(
                    condition
                        .productivities
                        .iter()
                        .map(|p| {
                            Value::map([
                                ("productivity", Value::string(&p.productivity)),
                                ("type", Value::string(&p.kind)),
                            ])
                        })
                        .collect(),
                ),
            );
            insert_some(&mut map, "tags", reference_list(&condition.tags));
            insert_some(&mut map, "categories", reference_list(&condition.categories));
            map.insert(
                "applicationtypes".to_string(),
                Value::List(
                    condition
                        .application_types
                        .iter()
                        .map(|t| {
                            Value::map([
                                ("applicationtype", Value::string(&t.application_type)),
                                ("type", Value::string(&t.kind)),
                            ])
                        })
                        .collect(),
                ),
            );
            Value::Map(map)
        })
        .collect()
}

pub fn restore_app_filter_conditions(
    blocks: &[NestedReader<'_>],
) -> ProviderResult<Vec<ApplicationFilterCondition>> {
    blocks
        .iter()
        .map(|block| {
            let r = block.reader();

            let risks = r
                .blocks("risks")?
                .iter()
                .map(|b| {
                    let r = b.reader();
                    Ok(RiskCondition {
                        risk: r.string("risk")?,
                        kind: r.string("type")?,
                    })
                })
                .collect::<ProviderResult<Vec<_>>>()?;

            let productivities = r
                .blocks("productivities")?
                .iter()
                .map(|b| {
                    let r = b.reader();
                    Ok(ProductivityCondition {
                        productivity: r.string("productivity")?,
                        kind: r.string("type")?,
                    })
                })
                .collect::<ProviderResult<Vec<_>>>()?;

            let application_types = r
                .blocks("applicationtypes")?
                .iter()
                .map(|b| {
                    let r = b.reader();
                    Ok(TypeCondition {
                        application_type: r.string("applicationtype")?,
                        kind: r.string("type")?,
                    })
                })
                .collect::<ProviderResult<Vec<_>>>()?;

            Ok(ApplicationFilterCondition {
                risks,
                productivities,
                tags: restore_references(r.value("tags"))?,
                categories: restore_references(r.value("categories"))?,
                filter: r.string("filter")?,
                application_types,
                kind: r.string("type")?,
            })
        })
        .collect()
}

// =============================================================================
// Embedded Filters
// =============================================================================

pub fn flatten_embedded_app_filter(filter: Option<&EmbeddedAppFilter>) -> Vec<Value> {
    let Some(filter) = filter.filter(|f| !f.kind.is_empty()) else {
        return Vec::new();
    };

    let mut map = HashMap::new();
    map.insert("type".to_string(), Value::string(&filter.kind));
    insert_some(&mut map, "applications", reference_list(&filter.applications));
    insert_some(
        &mut map,
        "applicationfilters",
        reference_list(&filter.application_filters),
    );
    map.insert(
        "conditions".to_string(),
        Value::List(flatten_conditions(&filter.conditions)),
    );
    vec![Value::Map(map)]
}

pub fn restore_embedded_app_filter(
    reader: AttributeReader<'_>,
) -> ProviderResult<EmbeddedAppFilter> {
    Ok(EmbeddedAppFilter {
        applications: restore_references(reader.value("applications"))?,
        application_filters: restore_references(reader.value("applicationfilters"))?,
        conditions: restore_app_filter_conditions(&reader.blocks("conditions")?)?,
        kind: reader.string("type")?,
    })
}

pub fn flatten_url_filter(filter: Option<&EmbeddedURLFilter>) -> Vec<Value> {
    let Some(filter) = filter.filter(|f| !f.kind.is_empty()) else {
        return Vec::new();
    };

    let categories = filter
        .url_categories
        .iter()
        .map(|matcher| {
            let mut map = HashMap::new();
            insert_some(
                &mut map,
                "urlcategory",
                single_reference(matcher.url_category.as_ref()),
            );
            insert_some(
                &mut map,
                "urlreputation",
                single_reference(matcher.url_reputation.as_ref()),
            );
            map.insert(
                "includeunknownurlreputation".to_string(),
                Value::Bool(matcher.include_unknown_url_reputation),
            );
            map.insert("type".to_string(), Value::string(&matcher.kind));
            Value::Map(map)
        })
        .collect();

    let mut map = HashMap::new();
    insert_some(&mut map, "urlobjects", reference_list(&filter.url_objects));
    map.insert("urlcategories".to_string(), Value::List(categories));
    map.insert("type".to_string(), Value::string(&filter.kind));
    vec![Value::Map(map)]
}

pub fn restore_url_filter(reader: AttributeReader<'_>) -> ProviderResult<EmbeddedURLFilter> {
    let url_categories = reader
        .blocks("urlcategories")?
        .iter()
        .map(|b| {
            let r = b.reader();
            Ok(URLCategoryMatcher {
                url_category: restore_reference(r.value("urlcategory"))?,
                url_reputation: restore_reference(r.value("urlreputation"))?,
                include_unknown_url_reputation: r.bool("includeunknownurlreputation")?,
                kind: r.string("type")?,
            })
        })
        .collect::<ProviderResult<Vec<_>>>()?;

    Ok(EmbeddedURLFilter {
        url_objects: restore_references(reader.value("urlobjects"))?,
        url_categories,
        kind: reader.string("type")?,
    })
}

// =============================================================================
// Access Policy Settings
// =============================================================================

pub fn flatten_default_action(action: Option<&AccessDefaultAction>) -> Vec<Value> {
    let Some(action) = action.filter(|a| !a.kind.is_empty()) else {
        return Vec::new();
    };

    let mut map = HashMap::new();
    map.insert("action".to_string(), Value::string(&action.action));
    map.insert(
        "eventlogaction".to_string(),
        Value::string(&action.event_log_action),
    );
    insert_some(
        &mut map,
        "intrusionpolicy",
        single_reference(action.intrusion_policy.as_ref()),
    );
    insert_some(
        &mut map,
        "syslogserver",
        single_reference(action.syslog_server.as_ref()),
    );
    map.insert("type".to_string(), Value::string(&action.kind));
    vec![Value::Map(map)]
}

pub fn restore_default_action(reader: AttributeReader<'_>) -> ProviderResult<AccessDefaultAction> {
    Ok(AccessDefaultAction {
        action: reader.string("action")?,
        event_log_action: reader.string("eventlogaction")?,
        intrusion_policy: restore_reference(reader.value("intrusionpolicy"))?,
        syslog_server: restore_reference(reader.value("syslogserver"))?,
        kind: reader.string("type")?,
    })
}

pub fn flatten_advanced_settings(settings: Option<&AdvancedSettings>) -> Vec<Value> {
    match settings.filter(|s| !s.kind.is_empty()) {
        Some(settings) => vec![Value::map([
            (
                "dnsreputationenforcementenabled",
                Value::Bool(settings.dns_reputation_enforcement_enabled),
            ),
            ("type", Value::string(&settings.kind)),
        ])],
        None => Vec::new(),
    }
}

pub fn restore_advanced_settings(reader: AttributeReader<'_>) -> ProviderResult<AdvancedSettings> {
    Ok(AdvancedSettings {
        dns_reputation_enforcement_enabled: reader.bool("dnsreputationenforcementenabled")?,
        kind: reader.string("type")?,
    })
}
