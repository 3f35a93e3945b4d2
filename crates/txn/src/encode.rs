//! Canonical msgpack encoding.
//!
//! The ledger hashes and verifies the exact bytes, so the encoding is fixed:
//! maps with keys in lexicographic order, empty or zero fields left out, and
//! integers in their smallest msgpack form.

use latinum_primitives::Address;
use rmp::encode as mp;

use crate::{
    errors::TxnError,
    transaction::{AssetConfigParams, Transaction, TxKind},
};

/// A msgpack value as the ledger's codec sees it.
enum Value<'a> {
    Uint(u64),
    Str(&'a str),
    Bin(&'a [u8]),
    /// Fixed-width byte array, omitted when all zero.
    Fixed(&'a [u8; 32]),
    Bool(bool),
    Map(Vec<(&'static str, Value<'a>)>),
}

impl Value<'_> {
    fn is_empty(&self) -> bool {
        match self {
            Value::Uint(v) => *v == 0,
            Value::Str(s) => s.is_empty(),
            Value::Bin(b) => b.is_empty(),
            Value::Fixed(b) => b.iter().all(|x| *x == 0),
            Value::Bool(b) => !*b,
            Value::Map(entries) => entries.iter().all(|(_, v)| v.is_empty()),
        }
    }
}

fn address(addr: &Address) -> Value<'_> {
    Value::Fixed(addr.as_bytes())
}

fn opt_address(addr: &Option<Address>) -> Value<'_> {
    match addr {
        Some(a) => address(a),
        None => Value::Bin(&[]),
    }
}

fn opt_str(s: &Option<String>) -> Value<'_> {
    Value::Str(s.as_deref().unwrap_or_default())
}

fn params_value(params: &AssetConfigParams) -> Value<'_> {
    let spec = &params.spec;
    let roles = &params.roles;
    Value::Map(vec![
        (
            "am",
            match &spec.metadata_hash {
                Some(h) => Value::Fixed(h.as_bytes()),
                None => Value::Bin(&[]),
            },
        ),
        ("an", opt_str(&spec.asset_name)),
        ("au", opt_str(&spec.url)),
        ("c", opt_address(&roles.clawback)),
        ("dc", Value::Uint(spec.decimals.into())),
        ("df", Value::Bool(spec.default_frozen)),
        ("f", opt_address(&roles.freeze)),
        ("m", opt_address(&roles.manager)),
        ("r", opt_address(&roles.reserve)),
        ("t", Value::Uint(spec.total)),
        ("un", opt_str(&spec.unit_name)),
    ])
}

fn transaction_value(txn: &Transaction) -> Value<'_> {
    let header = &txn.header;
    let mut entries = vec![
        ("fee", Value::Uint(header.fee)),
        ("fv", Value::Uint(header.first_valid.get())),
        ("gen", Value::Str(&header.genesis_id)),
        ("gh", Value::Fixed(&header.genesis_hash)),
        ("lv", Value::Uint(header.last_valid.get())),
        ("note", Value::Bin(&header.note)),
        ("snd", address(&header.sender)),
        ("type", Value::Str(txn.kind.type_tag())),
    ];

    match &txn.kind {
        TxKind::AssetConfig(cfg) => {
            entries.push(("caid", Value::Uint(cfg.asset_id.get())));
            entries.push(("apar", params_value(&cfg.params)));
        }
        TxKind::AssetTransfer(xfer) => {
            entries.push(("xaid", Value::Uint(xfer.asset_id.get())));
            entries.push(("aamt", Value::Uint(xfer.amount)));
            entries.push(("arcv", address(&xfer.receiver)));
            entries.push(("asnd", opt_address(&xfer.revocation_target)));
            entries.push(("aclose", opt_address(&xfer.close_to)));
        }
        TxKind::AssetFreeze(frz) => {
            entries.push(("faid", Value::Uint(frz.asset_id.get())));
            entries.push(("fadd", address(&frz.target)));
            entries.push(("afrz", Value::Bool(frz.frozen)));
        }
    }

    Value::Map(entries)
}

fn write_value(buf: &mut Vec<u8>, value: Value<'_>) -> Result<(), TxnError> {
    match value {
        Value::Uint(v) => {
            mp::write_uint(buf, v).map_err(TxnError::encode)?;
        }
        Value::Str(s) => mp::write_str(buf, s).map_err(TxnError::encode)?,
        Value::Bin(b) => mp::write_bin(buf, b).map_err(TxnError::encode)?,
        Value::Fixed(b) => mp::write_bin(buf, b).map_err(TxnError::encode)?,
        Value::Bool(b) => mp::write_bool(buf, b).map_err(TxnError::encode)?,
        Value::Map(entries) => write_map(buf, entries)?,
    }
    Ok(())
}

fn write_map(
    buf: &mut Vec<u8>,
    mut entries: Vec<(&'static str, Value<'_>)>,
) -> Result<(), TxnError> {
    entries.retain(|(_, v)| !v.is_empty());
    entries.sort_by_key(|(k, _)| *k);

    let len = u32::try_from(entries.len()).map_err(TxnError::encode)?;
    mp::write_map_len(buf, len).map_err(TxnError::encode)?;
    for (key, value) in entries {
        mp::write_str(buf, key).map_err(TxnError::encode)?;
        write_value(buf, value)?;
    }
    Ok(())
}

pub(crate) fn write_transaction(buf: &mut Vec<u8>, txn: &Transaction) -> Result<(), TxnError> {
    write_value(buf, transaction_value(txn))
}

pub(crate) fn write_signed(
    buf: &mut Vec<u8>,
    signature: &[u8],
    txn: &Transaction,
) -> Result<(), TxnError> {
    write_map(
        buf,
        vec![("sig", Value::Bin(signature)), ("txn", transaction_value(txn))],
    )
}
