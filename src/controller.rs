/*!
Standard controller: an 8-bit parallel-in/serial-out shift register at
$4016/$4017.

- Button bits in read order: A, B, Select, Start, Up, Down, Left, Right.
- A write to $4016 drives the strobe (bit 0). While the strobe is high the
  register keeps reloading from the live buttons, so reads return A.
- With the strobe low, each read shifts out the next latched bit. After all
  eight, reads return 1.
- Every read has bit 6 (0x40) set, which mirrors the open-bus upper bits a
  real console leaves on the data lines.

Host input (keyboard/gamepad mapping) sets the live button state through
`set_button` / `set_state_mask`.
*/

const STATUS_BITS: u8 = 0x40;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Button {
    A,
    B,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    #[inline]
    fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Controller {
    buttons: u8,
    shift: u8,
    strobe: bool,
    // Bits shifted out since the last latch; saturates at 8.
    reads: u8,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        if pressed {
            self.buttons |= button.mask();
        } else {
            self.buttons &= !button.mask();
        }
    }

    pub fn press(&mut self, button: Button) {
        self.set_button(button, true);
    }

    pub fn release(&mut self, button: Button) {
        self.set_button(button, false);
    }

    /// Replace the live state; bit n corresponds to `Button` variant n.
    pub fn set_state_mask(&mut self, mask: u8) {
        self.buttons = mask;
    }

    pub fn write_strobe(&mut self, value: u8) {
        self.strobe = value & 1 != 0;
        if self.strobe {
            self.latch();
        }
    }

    pub fn read(&mut self) -> u8 {
        if self.strobe {
            self.latch();
            return (self.shift & 1) | STATUS_BITS;
        }
        let bit = if self.reads < 8 {
            let b = self.shift & 1;
            self.shift >>= 1;
            self.reads += 1;
            b
        } else {
            1
        };
        bit | STATUS_BITS
    }

    #[inline]
    fn latch(&mut self) {
        self.shift = self.buttons;
        self.reads = 0;
    }
}
