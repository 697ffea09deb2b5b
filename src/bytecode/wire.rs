//! Binary encoding of compiled bytecode, used by tests and tooling that
//! need to move a `Bytecode` value across a boundary that isn't a plain
//! Rust function call. Nothing in the running interpreter persists this to
//! disk between invocations.
use std::sync::Arc;

use crate::bytecode::bytecode::Bytecode;
use crate::runtime::compiled_function::CompiledFunction;
use crate::runtime::object::Object;

const TAG_INTEGER: u8 = 0;
const TAG_FLOAT: u8 = 1;
const TAG_STRING: u8 = 2;
const TAG_FUNCTION: u8 = 3;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WireError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unknown constant tag `{0}`")]
    UnknownTag(u8),
    #[error("constant is not encodable on the wire: {0}")]
    NotEncodable(&'static str),
}

pub fn encode(bytecode: &Bytecode) -> Result<Vec<u8>, WireError> {
    let mut out = Vec::new();
    out.extend_from_slice(&(bytecode.constants.len() as u32).to_be_bytes());
    out.extend_from_slice(&(bytecode.instructions.len() as u32).to_be_bytes());

    for constant in &bytecode.constants {
        encode_constant(constant, &mut out)?;
    }

    out.extend_from_slice(&bytecode.instructions);
    Ok(out)
}

fn encode_constant(object: &Object, out: &mut Vec<u8>) -> Result<(), WireError> {
    match object {
        Object::Integer(v) => {
            out.push(TAG_INTEGER);
            out.extend_from_slice(&v.to_be_bytes());
        }
        Object::Float(v) => {
            out.push(TAG_FLOAT);
            out.extend_from_slice(&v.to_bits().to_be_bytes());
        }
        Object::String(s) => {
            out.push(TAG_STRING);
            out.extend_from_slice(&(s.len() as u32).to_be_bytes());
            out.extend_from_slice(s.as_bytes());
        }
        Object::Function(f) => {
            out.push(TAG_FUNCTION);
            out.extend_from_slice(&(f.num_locals as u16).to_be_bytes());
            out.push(f.num_parameters as u8);
            out.extend_from_slice(&(f.instructions.len() as u32).to_be_bytes());
            out.extend_from_slice(&f.instructions);
        }
        other => return Err(WireError::NotEncodable(other.type_name())),
    }
    Ok(())
}

pub fn decode(bytes: &[u8]) -> Result<Bytecode, WireError> {
    let mut cursor = Cursor::new(bytes);
    let num_constants = cursor.read_u32()? as usize;
    let instructions_len = cursor.read_u32()? as usize;

    let mut constants = Vec::with_capacity(num_constants);
    for _ in 0..num_constants {
        constants.push(decode_constant(&mut cursor)?);
    }

    let instructions = cursor.read_bytes(instructions_len)?.to_vec();

    Ok(Bytecode { instructions, constants })
}

fn decode_constant(cursor: &mut Cursor) -> Result<Object, WireError> {
    match cursor.read_u8()? {
        TAG_INTEGER => Ok(Object::Integer(i64::from_be_bytes(
            cursor.read_bytes(8)?.try_into().unwrap(),
        ))),
        TAG_FLOAT => {
            let bits = u64::from_be_bytes(cursor.read_bytes(8)?.try_into().unwrap());
            Ok(Object::Float(f64::from_bits(bits)))
        }
        TAG_STRING => {
            let len = cursor.read_u32()? as usize;
            let bytes = cursor.read_bytes(len)?;
            Ok(Object::String(
                String::from_utf8(bytes.to_vec()).map_err(|_| WireError::UnknownTag(TAG_STRING))?,
            ))
        }
        TAG_FUNCTION => {
            let num_locals = cursor.read_u16()? as usize;
            let num_parameters = cursor.read_u8()? as usize;
            let instructions_len = cursor.read_u32()? as usize;
            let instructions = cursor.read_bytes(instructions_len)?.to_vec();
            Ok(Object::Function(Arc::new(CompiledFunction::new(
                instructions,
                num_locals,
                num_parameters,
            ))))
        }
        other => Err(WireError::UnknownTag(other)),
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        if self.pos + n > self.bytes.len() {
            return Err(WireError::UnexpectedEof);
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, WireError> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16, WireError> {
        Ok(u16::from_be_bytes(self.read_bytes(2)?.try_into().unwrap()))
    }

    fn read_u32(&mut self) -> Result<u32, WireError> {
        Ok(u32::from_be_bytes(self.read_bytes(4)?.try_into().unwrap()))
    }
}
