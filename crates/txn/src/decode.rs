//! Reading the canonical encoding back.
//!
//! Only the fields this crate writes are understood; any other key is
//! rejected. Callers that need to know the input was canonical re-encode the
//! result and compare.

use std::str;

use latinum_ledger_types::{AssetSpec, ControlRoles};
use latinum_primitives::{Address, AssetId, MetadataHash, Round};
use rmp::decode as mp;

use crate::{
    errors::TxnError,
    signed::{SignedTransaction, SIGNATURE_LEN},
    transaction::{
        AssetConfig, AssetConfigParams, AssetFreeze, AssetTransfer, Transaction, TxHeader, TxKind,
    },
};

struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], TxnError> {
        if self.buf.len() < len {
            return Err(TxnError::decode("unexpected end of input"));
        }
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    fn map_len(&mut self) -> Result<usize, TxnError> {
        let len = mp::read_map_len(&mut self.buf).map_err(TxnError::decode)?;
        Ok(len as usize)
    }

    fn str(&mut self) -> Result<&'a str, TxnError> {
        let len = mp::read_str_len(&mut self.buf).map_err(TxnError::decode)?;
        let bytes = self.take(len as usize)?;
        str::from_utf8(bytes).map_err(TxnError::decode)
    }

    fn bin(&mut self) -> Result<&'a [u8], TxnError> {
        let len = mp::read_bin_len(&mut self.buf).map_err(TxnError::decode)?;
        self.take(len as usize)
    }

    fn fixed<const N: usize>(&mut self) -> Result<[u8; N], TxnError> {
        let bytes = self.bin()?;
        bytes
            .try_into()
            .map_err(|_| TxnError::Decode(format!("expected {N} bytes, got {}", bytes.len())))
    }

    fn address(&mut self) -> Result<Address, TxnError> {
        Ok(Address::new(self.fixed()?))
    }

    fn uint(&mut self) -> Result<u64, TxnError> {
        mp::read_int(&mut self.buf).map_err(TxnError::decode)
    }

    fn bool(&mut self) -> Result<bool, TxnError> {
        mp::read_bool(&mut self.buf).map_err(TxnError::decode)
    }

    fn finish(&self) -> Result<(), TxnError> {
        if !self.buf.is_empty() {
            return Err(TxnError::Decode(format!("{} trailing bytes", self.buf.len())));
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> TxnError {
    TxnError::Decode(format!("unknown field {key:?}"))
}

fn read_params(rd: &mut Reader<'_>) -> Result<AssetConfigParams, TxnError> {
    let mut spec = AssetSpec::default();
    let mut roles = ControlRoles::default();

    for _ in 0..rd.map_len()? {
        match rd.str()? {
            "am" => spec.metadata_hash = Some(MetadataHash::new(rd.fixed()?)),
            "an" => spec.asset_name = Some(rd.str()?.to_owned()),
            "au" => spec.url = Some(rd.str()?.to_owned()),
            "c" => roles.clawback = Some(rd.address()?),
            "dc" => {
                spec.decimals = u32::try_from(rd.uint()?).map_err(TxnError::decode)?;
            }
            "df" => spec.default_frozen = rd.bool()?,
            "f" => roles.freeze = Some(rd.address()?),
            "m" => roles.manager = Some(rd.address()?),
            "r" => roles.reserve = Some(rd.address()?),
            "t" => spec.total = rd.uint()?,
            "un" => spec.unit_name = Some(rd.str()?.to_owned()),
            other => return Err(unknown_key(other)),
        }
    }

    Ok(AssetConfigParams { spec, roles })
}

fn read_transaction(rd: &mut Reader<'_>) -> Result<Transaction, TxnError> {
    let mut header = TxHeader {
        sender: Address::ZERO,
        fee: 0,
        first_valid: Round::default(),
        last_valid: Round::default(),
        genesis_id: String::new(),
        genesis_hash: [0; 32],
        note: Vec::new(),
    };
    let mut type_tag = "";

    let mut asset_id = 0;
    let mut params = AssetConfigParams::default();
    let mut amount = 0;
    let mut receiver = Address::ZERO;
    let mut revocation_target = None;
    let mut close_to = None;
    let mut target = Address::ZERO;
    let mut frozen = false;

    for _ in 0..rd.map_len()? {
        match rd.str()? {
            "fee" => header.fee = rd.uint()?,
            "fv" => header.first_valid = Round::new(rd.uint()?),
            "lv" => header.last_valid = Round::new(rd.uint()?),
            "gen" => header.genesis_id = rd.str()?.to_owned(),
            "gh" => header.genesis_hash = rd.fixed()?,
            "note" => header.note = rd.bin()?.to_vec(),
            "snd" => header.sender = rd.address()?,
            "type" => type_tag = rd.str()?,

            "caid" | "xaid" | "faid" => asset_id = rd.uint()?,
            "apar" => params = read_params(rd)?,

            "aamt" => amount = rd.uint()?,
            "arcv" => receiver = rd.address()?,
            "asnd" => revocation_target = Some(rd.address()?),
            "aclose" => close_to = Some(rd.address()?),

            "fadd" => target = rd.address()?,
            "afrz" => frozen = rd.bool()?,

            other => return Err(unknown_key(other)),
        }
    }

    let asset_id = AssetId::new(asset_id);
    let kind = match type_tag {
        "acfg" => TxKind::AssetConfig(AssetConfig { asset_id, params }),
        "axfer" => TxKind::AssetTransfer(AssetTransfer {
            asset_id,
            amount,
            receiver,
            revocation_target,
            close_to,
        }),
        "afrz" => TxKind::AssetFreeze(AssetFreeze {
            asset_id,
            target,
            frozen,
        }),
        other => return Err(TxnError::Decode(format!("unsupported type {other:?}"))),
    };

    Ok(Transaction::new(header, kind))
}

pub(crate) fn decode_transaction(buf: &[u8]) -> Result<Transaction, TxnError> {
    let mut rd = Reader::new(buf);
    let txn = read_transaction(&mut rd)?;
    rd.finish()?;
    Ok(txn)
}

pub(crate) fn decode_signed(buf: &[u8]) -> Result<SignedTransaction, TxnError> {
    let mut rd = Reader::new(buf);
    let mut signature = None;
    let mut txn = None;

    for _ in 0..rd.map_len()? {
        match rd.str()? {
            "sig" => signature = Some(rd.fixed::<SIGNATURE_LEN>()?),
            "txn" => txn = Some(read_transaction(&mut rd)?),
            other => return Err(unknown_key(other)),
        }
    }
    rd.finish()?;

    let signature = signature.ok_or_else(|| TxnError::decode("missing sig"))?;
    let txn = txn.ok_or_else(|| TxnError::decode("missing txn"))?;
    Ok(SignedTransaction::new(txn, signature))
}
