/*!
# Introduction

A CABSI program is a list of numbered lines. Each line holds one
instruction: a mnemonic and an optional comma-separated parameter list.
Lines run in line number order no matter what order they appear in the
file, and a line number used twice keeps only the last line.

```text
10 PUSH "Hello, world!"
20 PRINT
```

Anything after ` REM ` is a comment. Lines that don't start with a line
number are ignored, which makes blank lines and notes between lines free.

## Values

There are four kinds of value: integers, floats, text and `NULL`.
Parameters to `PUSH` are written as JSON literals, so text is double
quoted and `true`/`false` push `1` and `0`. `NULL` and `null` are the
same value.

```text
10 PUSH 1, 2.5, "three", true, NULL
```

## Stacks

Almost everything happens on the operand stack. A second stack, the
register stack, is reached only through `YEET` and `YOINK`. `GOSUB`
keeps its return lines on a third stack of its own.

An instruction that needs more values than a stack holds stops the
program. Nothing it would have done happens, and no later line runs.

## Jumps

Jump targets are line numbers. Jumping to a line that doesn't exist
continues at the next line that does; jumping past the last line ends
the program normally.

A target may also be taken from the operand stack. `@n` copies the
value `n` places down (the top is `@1`), `$n` removes it.

```text
10 PUSH 40
20 GOTO $1
30 PUSH "skipped"
40 PUSH "landed"
50 PRINT
```

*/
