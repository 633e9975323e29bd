use crate::chip8::Chip8;
use crate::constants::FONT_START;
use crate::error::Error;
use crate::instruction::Instruction;

/// clear
pub fn clr(chip: &mut Chip8, _op: Instruction) -> Result<(), Error> {
    chip.screen.clear();
    chip.frame_dirty = true;
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(chip: &mut Chip8, _op: Instruction) -> Result<(), Error> {
    chip.pc = chip.stack.pop()?;
    Ok(())
}

/// PC = addr
pub fn jump(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    chip.pc = op.nnn();
    Ok(())
}

/// STACK.push(PC); PC = addr
///
/// PC already points past the call, so RET lands on the next instruction.
pub fn call(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    chip.stack.push(chip.pc)?;
    chip.pc = op.nnn();
    Ok(())
}

/// if Vx == nn then pc += 2
pub fn ske(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    if chip.v[op.x() as usize] == op.nn() {
        chip.pc += 2;
    }
    Ok(())
}

/// if Vx != nn then pc += 2
pub fn skne(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    if chip.v[op.x() as usize] != op.nn() {
        chip.pc += 2;
    }
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    if chip.v[op.x() as usize] == chip.v[op.y() as usize] {
        chip.pc += 2;
    }
    Ok(())
}

/// Vx = nn
pub fn load(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    chip.v[op.x() as usize] = op.nn();
    Ok(())
}

/// Vx += nn; overflow wraps without touching VF
pub fn add(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    let x = op.x() as usize;
    chip.v[x] = chip.v[x].wrapping_add(op.nn());
    Ok(())
}

/// Vx = Vy
pub fn mv(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    chip.v[op.x() as usize] = chip.v[op.y() as usize];
    Ok(())
}

/// Vx |= Vy
pub fn or(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    chip.v[op.x() as usize] |= chip.v[op.y() as usize];
    Ok(())
}

/// Vx &= Vy
pub fn and(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    chip.v[op.x() as usize] &= chip.v[op.y() as usize];
    Ok(())
}

/// Vx ^= Vy
pub fn xor(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    chip.v[op.x() as usize] ^= chip.v[op.y() as usize];
    Ok(())
}

/// Vx += Vy; VF = carry
pub fn addr(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    let (x, y) = (op.x() as usize, op.y() as usize);
    let (result, carry) = chip.v[x].overflowing_add(chip.v[y]);
    chip.v[0xF] = carry as u8;
    chip.v[x] = result;
    Ok(())
}

/// Vx -= Vy; VF = (Vx > Vy) before the subtraction
pub fn sub(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    let (x, y) = (op.x() as usize, op.y() as usize);
    let flag = (chip.v[x] > chip.v[y]) as u8;
    let result = chip.v[x].wrapping_sub(chip.v[y]);
    chip.v[0xF] = flag;
    chip.v[x] = result;
    Ok(())
}

/// VF = Vx & 1; Vx >>= 1
pub fn shr(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    let x = op.x() as usize;
    let flag = chip.v[x] & 0x1;
    let result = chip.v[x] >> 1;
    chip.v[0xF] = flag;
    chip.v[x] = result;
    Ok(())
}

/// Vx = Vy - Vx; VF = (Vy > Vx) before the subtraction
pub fn subn(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    let (x, y) = (op.x() as usize, op.y() as usize);
    let flag = (chip.v[y] > chip.v[x]) as u8;
    let result = chip.v[y].wrapping_sub(chip.v[x]);
    chip.v[0xF] = flag;
    chip.v[x] = result;
    Ok(())
}

/// VF = high bit of Vx; Vx <<= 1
pub fn shl(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    let x = op.x() as usize;
    let flag = chip.v[x] >> 7;
    let result = chip.v[x] << 1;
    chip.v[0xF] = flag;
    chip.v[x] = result;
    Ok(())
}

/// if Vx != Vy then pc += 2
pub fn skrne(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    if chip.v[op.x() as usize] != chip.v[op.y() as usize] {
        chip.pc += 2;
    }
    Ok(())
}

/// I = addr
pub fn loadi(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    chip.i = op.nnn();
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    chip.pc = op.nnn() + u16::from(chip.v[0x0]);
    Ok(())
}

/// Vx = rand_byte & nn
pub fn rand(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    let rand_byte: u8 = rand::random();
    chip.v[op.x() as usize] = rand_byte & op.nn();
    Ok(())
}

/// draw_sprite(x=Vx, y=Vy, rows=mem[I..I+n]); VF = collision
pub fn draw(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    let start = chip.i as usize;
    let end = start + op.n() as usize;
    if end > chip.memory.len() {
        return Err(Error::MemoryOutOfBounds { address: end - 1 });
    }
    let collision = chip.screen.draw_sprite(
        chip.v[op.x() as usize],
        chip.v[op.y() as usize],
        &chip.memory[start..end],
    );
    chip.v[0xF] = collision as u8;
    chip.frame_dirty = true;
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    if chip.keypad.is_key_down(chip.v[op.x() as usize]) {
        chip.pc += 2;
    }
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    if !chip.keypad.is_key_down(chip.v[op.x() as usize]) {
        chip.pc += 2;
    }
    Ok(())
}

/// Vx = DT
pub fn moved(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    chip.v[op.x() as usize] = chip.delay_timer.get();
    Ok(())
}

/// Vx = await_key()
pub fn keyd(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    chip.v[op.x() as usize] = chip.keypad.await_key();
    Ok(())
}

/// DT = Vx
pub fn loads(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    chip.delay_timer.set(chip.v[op.x() as usize]);
    Ok(())
}

/// ST = Vx
pub fn ld(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    chip.sound_timer.set(chip.v[op.x() as usize]);
    Ok(())
}

/// I += Vx; VF = 1 if the sum leaves the 12-bit address range
pub fn addi(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    let sum = chip.i + u16::from(chip.v[op.x() as usize]);
    chip.v[0xF] = (sum > 0x0FFF) as u8;
    chip.i = sum & 0x0FFF;
    Ok(())
}

/// I = FONT_START + (Vx & 0xF) * 5
pub fn ldspr(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    chip.i = FONT_START as u16 + u16::from(chip.v[op.x() as usize] & 0xF) * 5;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    let value = chip.v[op.x() as usize];
    let i = chip.i as usize;
    chip.write_byte(i, value / 100)?;
    chip.write_byte(i + 1, value / 10 % 10)?;
    chip.write_byte(i + 2, value % 10)?;
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx; I += x + 1
///
/// This is the post-increment variant: I advances past the stored range.
pub fn stor(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    for offset in 0..=op.x() as usize {
        chip.write_byte(chip.i as usize + offset, chip.v[offset])?;
    }
    chip.i = (chip.i + u16::from(op.x()) + 1) & 0x0FFF;
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]; I += x + 1
///
/// Post-increment variant, the exact inverse of stor.
pub fn read(chip: &mut Chip8, op: Instruction) -> Result<(), Error> {
    for offset in 0..=op.x() as usize {
        chip.v[offset] = chip.read_byte(chip.i as usize + offset)?;
    }
    chip.i = (chip.i + u16::from(op.x()) + 1) & 0x0FFF;
    Ok(())
}
