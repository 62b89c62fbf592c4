use pretty_assertions::assert_eq;
use vm16_rs::{AsmConfig, Assembler, InstructionSet, Operand, RegisterFile, Statement};

// Memory-bank demo: write through bank 0 and bank 1, reading back via r1.
//   mov $01, &ff
//   mov $02, &00
//   mov $01, mb
//   mov &0000, r1
//   mov $00, mb
//   mov &0000, r1
fn bank_demo() -> Vec<Statement> {
    vec![
        Statement::instr("MOV_LIT_MEM", [Operand::lit("01"), Operand::lit("ff")]),
        Statement::instr("MOV_LIT_MEM", [Operand::lit("02"), Operand::lit("00")]),
        Statement::instr("MOV_LIT_REG", [Operand::lit("01"), Operand::reg("mb")]),
        Statement::instr("MOV_MEM_REG", [Operand::lit("0000"), Operand::reg("r1")]),
        Statement::instr("MOV_LIT_REG", [Operand::lit("00"), Operand::reg("mb")]),
        Statement::instr("MOV_MEM_REG", [Operand::lit("0000"), Operand::reg("r1")]),
    ]
}

#[test]
fn bank_demo_image() {
    let isa = InstructionSet::default_set();
    let regs = RegisterFile::default();
    let asm = Assembler::new(&isa, &regs, AsmConfig::default())
        .assemble(&bank_demo())
        .unwrap();
    assert_eq!(
        asm.bytes,
        vec![
            0x1B, 0x00, 0x01, 0x00, 0xFF, //
            0x1B, 0x00, 0x02, 0x00, 0x00, //
            0x10, 0x00, 0x01, 0x0C, //
            0x13, 0x00, 0x00, 0x02, //
            0x10, 0x00, 0x00, 0x0C, //
            0x13, 0x00, 0x00, 0x02,
        ]
    );
    assert!(asm.labels.is_empty());
}

#[test]
fn counting_loop() {
    //   mov $0000, acc
    // loop:
    //   add $0001, acc
    //   jne $000a, !loop
    //   hlt
    let prog = vec![
        Statement::instr("MOV_LIT_REG", [Operand::lit("0000"), Operand::reg("acc")]),
        Statement::label("loop"),
        Statement::instr("ADD_LIT_REG", [Operand::lit("0001"), Operand::reg("acc")]),
        Statement::instr("JNE_LIT", [Operand::lit("000a"), Operand::sym("loop")]),
        Statement::instr("HLT", []),
    ];
    let isa = InstructionSet::default_set();
    let regs = RegisterFile::default();
    let asm = Assembler::new(&isa, &regs, AsmConfig::default())
        .assemble(&prog)
        .unwrap();
    assert_eq!(asm.labels.get("loop"), Some(4));
    assert_eq!(
        asm.bytes,
        vec![
            0x10, 0x00, 0x00, 0x01, //
            0x3F, 0x00, 0x01, 0x01, //
            0x15, 0x00, 0x0A, 0x00, 0x04, //
            0xFF,
        ]
    );
}
