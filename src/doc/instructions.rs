/*!
# Instructions

Stack effects are written oldest to newest: in `a b -> a+b`, `b` was
pushed last.

## Input

| Mnemonic | Effect |
|---|---|
| `PUSH x, y, ...` | Push each literal in order. |
| `INPUT` | `prompt -> value`. Read a line and parse it as a literal. `NULL` at end of input. |
| `GETC` | Push one character of input, `NULL` at end of input. |
| `GETL` | Push one line without its line ending, `NULL` at end of input. |
| `GETW` | Push the next whitespace-separated word, `NULL` at end of input. |

## Stack

| Mnemonic | Effect |
|---|---|
| `ROT` | `a b c -> b c a` |
| `DUP` | `a -> a a` |
| `POP` | `a ->` |
| `SWAP` | `a b -> b a` |
| `OVER` | `a b -> a b a` |
| `YEET` | Move the top value to the register stack. |
| `YOINK` | Move the top register to the operand stack. |
| `SIZE` | Push the depth of the operand stack. |
| `RSIZE` | Push the depth of the register stack. |

## Control

| Mnemonic | Effect |
|---|---|
| `GOTO n` | Continue at line `n`. |
| `JP n` | Jump if the top value is greater than zero. |
| `JNP n` | Jump if the top value is not greater than zero. |
| `JN n` | Jump if the top value is less than zero. |
| `JNN n` | Jump if the top value is not less than zero. |
| `JZ n` | Jump if the top value is zero. |
| `JNL n` | If the top value is `NULL`, pop it and jump. |
| `GOSUB n` | Remember this line and jump. |
| `RETURN` | Continue at the line after the matching `GOSUB`. |

The conditional jumps leave the tested value on the stack. Text and
`NULL` never pass a numeric test.

## Arithmetic

| Mnemonic | Effect |
|---|---|
| `INC` / `DEC` | `a -> a+1` / `a -> a-1` |
| `ADD` | `a b -> a+b`. Joins text when either side is text. |
| `SUB` / `MUL` | `a b -> a-b` / `a b -> a*b` |
| `DIV` | `a b -> a/b`, always a float. |
| `MOD` | `a b -> a%b`, sign of `a`. |
| `DIVMOD` | `a b -> a/b a%b` |

## Conversion

| Mnemonic | Effect |
|---|---|
| `MAKEI` | Truncate a number, or read a leading integer from text. |
| `MAKEF` | Read a leading float from text. Numbers are unchanged. |
| `MAKES` | The value as text, the way `PRINT` would show it. |
| `ORD` | Code point of the first character of text. |
| `CHR` | Text of one character from a code point. |

Conversions never stop the program. Anything they cannot convert
becomes `NULL`.

## Comparison

`EQ`, `LESS`, `MORE`, `LESSEQ` and `MOREEQ` replace `a b` with `1` or `0`.
Numbers compare with numbers and text with text. `EQ` of different
kinds is `0`; ordering them stops the program with a type mismatch.

## Miscellaneous

| Mnemonic | Effect |
|---|---|
| `DEBUG` | Log the pointer, the line and both stacks. |
| `EXIT` | Stop the program. |
| `PRINT` | Pop and print with a newline. |

## Example

```text
10 PUSH 3
20 GOSUB 100
30 DEC
40 JP 20
50 EXIT
100 DUP
110 PRINT
120 RETURN
```
*/
