use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::invalid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 16, title = "Packet Decoder", tags = ["2021", "parsing"])]
pub struct Day16;

const LITERAL: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    Literal {
        version: u8,
        value: u64,
    },
    Operator {
        version: u8,
        type_id: u8,
        packets: Vec<Packet>,
    },
}

/// MSB-first reader over the bits of the hex transmission
struct BitReader {
    bits: Vec<bool>,
    pos: usize,
}

impl BitReader {
    fn from_hex(hex: &str) -> Result<Self, ParseError> {
        let mut bits = Vec::with_capacity(hex.len() * 4);
        for c in hex.chars() {
            let nibble = c
                .to_digit(16)
                .ok_or_else(|| invalid(format!("not a hex digit: {:?}", c)))?;
            bits.extend((0..4).rev().map(|i| nibble >> i & 1 == 1));
        }
        Ok(Self { bits, pos: 0 })
    }

    fn read(&mut self, n: usize) -> Result<u64, ParseError> {
        let end = self.pos + n;
        let bits = self.bits.get(self.pos..end).ok_or_else(|| {
            invalid(format!(
                "transmission truncated: wanted {} bits at offset {}",
                n, self.pos
            ))
        })?;
        self.pos = end;
        Ok(bits.iter().fold(0, |acc, &b| acc << 1 | u64::from(b)))
    }

    fn packet(&mut self) -> Result<Packet, ParseError> {
        let version = self.read(3)? as u8;
        let type_id = self.read(3)? as u8;

        if type_id == LITERAL {
            let mut value = 0u64;
            loop {
                let more = self.read(1)? == 1;
                if value >> 60 != 0 {
                    return Err(invalid("literal does not fit in 64 bits"));
                }
                value = value << 4 | self.read(4)?;
                if !more {
                    break;
                }
            }
            return Ok(Packet::Literal { version, value });
        }

        let mut packets = Vec::new();
        if self.read(1)? == 0 {
            let length = self.read(15)? as usize;
            let end = self.pos + length;
            while self.pos < end {
                packets.push(self.packet()?);
            }
            if self.pos != end {
                return Err(invalid("sub-packets overrun their declared length"));
            }
        } else {
            let count = self.read(11)?;
            for _ in 0..count {
                packets.push(self.packet()?);
            }
        }

        Ok(Packet::Operator {
            version,
            type_id,
            packets,
        })
    }
}

impl Packet {
    fn version_sum(&self) -> u64 {
        match self {
            Packet::Literal { version, .. } => u64::from(*version),
            Packet::Operator {
                version, packets, ..
            } => u64::from(*version) + packets.iter().map(Packet::version_sum).sum::<u64>(),
        }
    }

    fn evaluate(&self) -> Result<u64, SolveError> {
        let (type_id, packets) = match self {
            Packet::Literal { value, .. } => return Ok(*value),
            Packet::Operator {
                type_id, packets, ..
            } => (*type_id, packets),
        };
        let values = packets
            .iter()
            .map(Packet::evaluate)
            .collect::<Result<Vec<_>, _>>()?;
        let overflow = || SolveError::failed("expression overflows 64 bits");

        match type_id {
            0 => values
                .iter()
                .try_fold(0u64, |acc, &v| acc.checked_add(v))
                .ok_or_else(overflow),
            1 => values
                .iter()
                .try_fold(1u64, |acc, &v| acc.checked_mul(v))
                .ok_or_else(overflow),
            2 => values
                .iter()
                .min()
                .copied()
                .ok_or_else(|| SolveError::failed("minimum of no packets")),
            3 => values
                .iter()
                .max()
                .copied()
                .ok_or_else(|| SolveError::failed("maximum of no packets")),
            5..=7 => match values.as_slice() {
                [a, b] => Ok(u64::from(match type_id {
                    5 => a > b,
                    6 => a < b,
                    _ => a == b,
                })),
                _ => Err(SolveError::failed(format!(
                    "comparison needs exactly two packets, found {}",
                    values.len()
                ))),
            },
            other => Err(SolveError::failed(format!("unknown packet type {}", other))),
        }
    }
}

impl AocParser for Day16 {
    type SharedData<'a> = Packet;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let hex = input.trim();
        if hex.is_empty() {
            return Err(ParseError::MissingData("empty transmission".into()));
        }
        // trailing bits after the outermost packet are padding
        BitReader::from_hex(hex)?.packet()
    }
}

impl PartSolver<1> for Day16 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.version_sum().to_string())
    }
}

impl PartSolver<2> for Day16 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.evaluate()?.to_string())
    }
}
